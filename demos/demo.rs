use mahjong_waits::{parse_tiles, resolve_groupings, winning_candidates};

fn main() {
    println!("Mahjong waits\n");

    // Nine gates: waits on every tile of its suit
    let hand = parse_tiles("1112345678999m").expect("valid hand");
    println!("Hand: {}", join(&hand));

    match winning_candidates(&hand, 0) {
        Ok(waits) => println!("Waits: {}", join(&waits)),
        Err(e) => println!("Error: {}", e),
    }

    // Same shape with one tile replaced by a wildcard
    let short = parse_tiles("123m456m789m11p5s").expect("valid hand");
    println!("\nHand: {} + 1 wildcard", join(&short));
    match winning_candidates(&short, 1) {
        Ok(waits) => println!("Waits: {}", join(&waits)),
        Err(e) => println!("Error: {}", e),
    }

    // Too few tiles for the wildcard count
    match winning_candidates(&short, 0) {
        Ok(_) => println!("Unexpected success"),
        Err(e) => println!("Error: {}", e),
    }

    let partial = parse_tiles("11234m").expect("valid hand");
    let candidates = resolve_groupings(&partial);
    println!("\nGroupings of {} ({} found):", join(&partial), candidates.len());
    for (i, candidate) in candidates.iter().enumerate() {
        let melds: Vec<String> = candidate.melds.iter().map(|m| m.to_string()).collect();
        match candidate.leftover {
            Some(tile) => println!("  {}: {}  leftover {}", i + 1, melds.join(" "), tile),
            None => println!("  {}: {}", i + 1, melds.join(" ")),
        }
    }
}

fn join<T: ToString>(tiles: &[T]) -> String {
    tiles.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(" ")
}
