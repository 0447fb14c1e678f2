use mahjong_waits::{AnalysisError, MeldType, Tile, parse_tiles, resolve_groupings, winning_candidates};

fn tiles(notation: &str) -> Vec<Tile> {
    parse_tiles(notation).unwrap()
}

fn names(tiles: &[Tile]) -> Vec<String> {
    tiles.iter().map(|t| t.to_string()).collect()
}

#[test]
fn quad_plus_runs_waits_match_manual_enumeration() {
    // 111-123-456-77-888, 111-123-345-678-88, 111-123-44-567-888,
    // 111-123-456-678-88, 111-123-456-789-88
    let waits = winning_candidates(&tiles("1111234567888m"), 0).unwrap();
    assert_eq!(names(&waits), ["3m", "4m", "6m", "7m", "9m"]);
}

#[test]
fn one_suit_hand_includes_pair_completion() {
    let waits = winning_candidates(&tiles("1123456789999m"), 0).unwrap();
    // 11 pair, 999 and three runs that shift with the drawn tile
    let waits = names(&waits);
    assert!(waits.contains(&"1m".to_string()));
    assert_eq!(waits, ["1m", "4m", "7m"]);
}

#[test]
fn wildcard_adds_completions() {
    let plain = winning_candidates(&tiles("123p456p789p22s33s"), 0).unwrap();
    let wild = winning_candidates(&tiles("123p456p789p2s33s"), 1).unwrap();
    assert_eq!(names(&plain), ["2s", "3s"]);
    assert!(plain.iter().all(|t| wild.contains(t)));
    assert!(wild.len() > plain.len());
}

#[test]
fn invalid_sizes_are_rejected() {
    let ten = tiles("123m456m789m1p");
    assert_eq!(
        winning_candidates(&ten, 2),
        Err(AnalysisError::InvalidHandSize { tiles: 10, wildcards: 2 })
    );
    assert!(matches!(
        winning_candidates(&tiles("123m456m789m123p"), -1),
        Err(AnalysisError::InvalidHandSize { .. })
    ));
}

#[test]
fn five_copies_rejected_before_the_core() {
    assert!(matches!(parse_tiles("11111m"), Err(AnalysisError::TooManyCopies(_))));
}

#[test]
fn empty_hand_has_no_groupings() {
    assert!(resolve_groupings(&[]).is_empty());
}

#[test]
fn groupings_find_the_waiting_tile() {
    // 123 456 + 7: every complete grouping leaves exactly the 7m over
    let candidates = resolve_groupings(&tiles("1234567m"));
    let complete: Vec<_> = candidates
        .iter()
        .filter(|c| c.melds.iter().all(|m| m.meld_type == MeldType::Sequence))
        .collect();
    assert!(!complete.is_empty());
    assert!(complete.iter().any(|c| c.leftover == Some("7m".parse().unwrap())));
}

#[test]
fn wildcard_for_a_quad_tile_keeps_every_wait() {
    let plain = winning_candidates(&tiles("1112334456789m"), 0).unwrap();
    let wild = winning_candidates(&tiles("112334456789m"), 1).unwrap();
    assert_eq!(names(&plain), ["2m", "3m", "5m", "6m", "9m"]);
    assert!(plain.iter().all(|t| wild.contains(t)), "wild={:?}", names(&wild));
    assert_eq!(names(&wild), ["1m", "2m", "3m", "4m", "5m", "6m", "7m", "8m", "9m"]);
}
