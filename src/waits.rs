use crate::{AnalysisError, MAX_COPIES, NoTrace, TILE_INDEX_SPAN, Tile, TraceSink};

/// Tiles in a hand waiting for its winning tile
pub const HAND_SIZE: usize = 13;

/// Melds in a winning hand
const MELDS: i32 = 4;

/// Pairs in a winning hand
const PAIRS: i32 = 1;

/// Working counts indexed by [`Tile::index`]. Entries go negative while a
/// search borrows tiles from the wildcard budget.
pub type TileCounts = [i32; TILE_INDEX_SPAN];

/// Find every tile that completes `hand` into four melds and a pair.
///
/// `wildcards` unspecified tiles may stand in for any tile; the hand plus the
/// wildcards must total 13. Tiles already held four times are never probed.
/// Results come back in tile index order.
pub fn winning_candidates(hand: &[Tile], wildcards: i32) -> Result<Vec<Tile>, AnalysisError> {
    winning_candidates_traced(hand, wildcards, &mut NoTrace)
}

/// [`winning_candidates`] reporting each probe to `sink`
pub fn winning_candidates_traced(
    hand: &[Tile],
    wildcards: i32,
    sink: &mut dyn TraceSink,
) -> Result<Vec<Tile>, AnalysisError> {
    if wildcards < 0 || hand.len() as i64 + wildcards as i64 != HAND_SIZE as i64 {
        return Err(AnalysisError::InvalidHandSize {
            tiles: hand.len(),
            wildcards,
        });
    }

    let mut counts: TileCounts = [0; TILE_INDEX_SPAN];
    for tile in hand {
        counts[tile.index()] += 1;
    }

    let mut waits = Vec::new();
    for tile in Tile::all() {
        let index = tile.index();
        if counts[index] >= MAX_COPIES as i32 {
            continue;
        }

        // Draw the probe tile, check, put it back
        counts[index] += 1;
        let wins = is_complete(&mut counts, wildcards);
        counts[index] -= 1;

        sink.trace(format_args!("- probe {}: {}", tile, if wins { "wins" } else { "no" }));
        if wins {
            waits.push(tile);
        }
    }

    sink.trace(format_args!("{} winning tiles with {} wildcards", waits.len(), wildcards));
    Ok(waits)
}

/// Check whether `counts` plus `wildcards` free tiles form four melds and a pair.
///
/// `counts` is used as scratch space and is restored before returning.
pub fn is_complete(counts: &mut TileCounts, wildcards: i32) -> bool {
    search(counts, 0, MELDS, PAIRS, wildcards)
}

/// Total number of tiles borrowed from the wildcard budget
fn deficit(counts: &TileCounts) -> i32 {
    counts.iter().filter(|&&c| c < 0).map(|&c| -c).sum()
}

/// Whether a sequence can start at `index` without leaving its suit
fn sequence_fits(index: usize) -> bool {
    Tile::from_index(index).is_some_and(|tile| tile.rank() <= 7)
}

/// Starts of the sequences that contain `index` without leaving its suit.
/// Starts below `index` only ever borrow, since the scan has emptied them.
fn sequence_starts(index: usize) -> impl Iterator<Item = usize> {
    (index.saturating_sub(2)..=index).filter(|&start| sequence_fits(start))
}

/// Take one meld's tiles out of `counts`, run the search, give them back.
fn with_taken(
    counts: &mut TileCounts,
    indices: &[usize],
    amount: i32,
    next: usize,
    melds_needed: i32,
    pairs_needed: i32,
    wildcards: i32,
) -> bool {
    for &i in indices {
        counts[i] -= amount;
    }
    let complete = search(counts, next, melds_needed, pairs_needed, wildcards);
    for &i in indices {
        counts[i] += amount;
    }
    complete
}

/// Place the lowest real tile left from `start` into every meld or pair that
/// can hold it. Missing partners are borrowed: their counts go negative.
fn search(counts: &mut TileCounts, start: usize, melds_needed: i32, pairs_needed: i32, wildcards: i32) -> bool {
    // Borrowing only ever grows along a branch, so an overdrawn budget is final
    let borrowed = deficit(counts);
    if borrowed > wildcards || melds_needed < 0 || pairs_needed < 0 {
        return false;
    }

    let Some(i) = (start..TILE_INDEX_SPAN).find(|&i| counts[i] > 0) else {
        // Every real tile is placed. Whatever wildcards were not borrowed
        // must fill the melds and pair still missing.
        return borrowed + 3 * melds_needed + 2 * pairs_needed == wildcards;
    };

    // Every branch uses at least one real copy of `i`, and the scan stays on
    // `i` while copies remain
    with_taken(counts, &[i], 3, i, melds_needed - 1, pairs_needed, wildcards)
        || with_taken(counts, &[i], 2, i, melds_needed, pairs_needed - 1, wildcards)
        || sequence_starts(i).any(|s| {
            with_taken(counts, &[s, s + 1, s + 2], 1, i, melds_needed - 1, pairs_needed, wildcards)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_tiles;

    fn waits(notation: &str, wildcards: i32) -> Vec<String> {
        let hand = parse_tiles(notation).unwrap();
        winning_candidates(&hand, wildcards)
            .unwrap()
            .iter()
            .map(|t| t.to_string())
            .collect()
    }

    fn counts_of(notation: &str) -> TileCounts {
        let mut counts = [0; TILE_INDEX_SPAN];
        for tile in parse_tiles(notation).unwrap() {
            counts[tile.index()] += 1;
        }
        counts
    }

    #[test]
    fn test_rejects_negative_wildcards() {
        let hand = parse_tiles("123m456m789m1234p").unwrap();
        assert_eq!(
            winning_candidates(&hand[..12], -1),
            Err(AnalysisError::InvalidHandSize {
                tiles: 12,
                wildcards: -1
            })
        );
    }

    #[test]
    fn test_rejects_wrong_total() {
        let hand = parse_tiles("123m456m789m1p").unwrap();
        assert_eq!(hand.len(), 10);
        assert_eq!(
            winning_candidates(&hand, 2),
            Err(AnalysisError::InvalidHandSize {
                tiles: 10,
                wildcards: 2
            })
        );
        assert!(winning_candidates(&hand, 4).is_err());
    }

    #[test]
    fn test_four_copies_and_runs() {
        // 1m is held four times and never probed; 2m, 5m, 8m do not fit
        assert_eq!(waits("1111234567888m", 0), vec!["3m", "4m", "6m", "7m", "9m"]);
    }

    #[test]
    fn test_nine_gates_waits_on_whole_suit() {
        assert_eq!(
            waits("1112345678999m", 0),
            vec!["1m", "2m", "3m", "4m", "5m", "6m", "7m", "8m", "9m"]
        );
    }

    #[test]
    fn test_two_sided_wait() {
        assert_eq!(waits("123456789m1234p", 0), vec!["1p", "4p"]);
    }

    #[test]
    fn test_double_pair_wait() {
        assert_eq!(waits("123m456m789m11p55s", 0), vec!["1p", "5s"]);
    }

    #[test]
    fn test_wildcard_keeps_plain_waits() {
        // One 5s swapped for a wildcard: both old waits survive, and the
        // wildcard can now also complete a sequence around 5s
        let plain = waits("123m456m789m11p55s", 0);
        let wild = waits("123m456m789m11p5s", 1);
        assert!(plain.iter().all(|t| wild.contains(t)));
        assert_eq!(wild, vec!["1p", "3s", "4s", "5s", "6s", "7s"]);
    }

    #[test]
    fn test_wildcard_keeps_waits_of_full_hand() {
        // One 1m swapped for a wildcard. 2m and 5m need the wildcard as the
        // low end of a run, or a run followed by a borrowed pair.
        let full = waits("1112334456789m", 0);
        assert_eq!(full, vec!["2m", "3m", "5m", "6m", "9m"]);
        let wild = waits("112334456789m", 1);
        assert!(full.iter().all(|t| wild.contains(t)), "wild={wild:?}");
        assert_eq!(wild.len(), 9);
    }

    #[test]
    fn test_wildcard_fills_below_scan() {
        // 9m completes 11 234 567 999 with the wildcard as the 7m of 789
        let wild = waits("112345678999m", 1);
        assert!(wild.contains(&"9m".to_string()));
    }

    #[test]
    fn test_sequence_starts_stay_in_suit() {
        assert_eq!(sequence_starts(1).collect::<Vec<_>>(), vec![1]);
        assert_eq!(sequence_starts(5).collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(sequence_starts(9).collect::<Vec<_>>(), vec![7]);
        assert_eq!(sequence_starts(12).collect::<Vec<_>>(), vec![11, 12]);
    }

    #[test]
    fn test_all_wildcards_win_on_anything() {
        assert_eq!(waits("", 13).len(), 27);
    }

    #[test]
    fn test_not_ready() {
        assert!(waits("19m19p19s1234567m", 0).is_empty());
    }

    #[test]
    fn test_sequences_do_not_cross_suits() {
        assert!(!sequence_fits(8));
        assert!(!sequence_fits(9));
        assert!(!sequence_fits(10));
        assert!(sequence_fits(7));
        assert!(sequence_fits(21));
        assert!(!sequence_fits(28));
    }

    #[test]
    fn test_is_complete_restores_counts() {
        let mut counts = counts_of("11122233344455m");
        let before = counts;
        assert!(is_complete(&mut counts, 0));
        assert_eq!(counts, before);

        let mut counts = counts_of("11122233344457m");
        let before = counts;
        assert!(!is_complete(&mut counts, 0));
        assert_eq!(counts, before);
    }

    #[test]
    fn test_is_complete_pair_from_wildcards() {
        // Four melds from real tiles, the pair made of two wildcards
        let mut counts = counts_of("123m456m789m123p");
        assert!(is_complete(&mut counts, 2));
        assert!(!is_complete(&mut counts, 1));
    }

    #[test]
    fn test_trace_does_not_change_result() {
        let hand = parse_tiles("1112345678999m").unwrap();
        let mut sink: Vec<String> = Vec::new();
        let traced = winning_candidates_traced(&hand, 0, &mut sink).unwrap();
        assert_eq!(traced, winning_candidates(&hand, 0).unwrap());
        assert_eq!(sink.iter().filter(|line| line.starts_with("- probe")).count(), 27);
    }
}
