use crate::{Hand, Meld, NoTrace, Tile, TraceSink};
use std::fmt;

/// One complete decomposition of a hand found by [`resolve_groupings`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The hand as given, in input order
    pub hand: Vec<Tile>,
    /// Per-tile counts of the whole hand
    pub counts: Hand,
    /// Melds in the order they were built; the last may still be incomplete
    pub melds: Vec<Meld>,
    /// The one tile left ungrouped, if any
    pub leftover: Option<Tile>,
}

impl Candidate {
    /// Number of tiles accounted for by the melds and the leftover
    pub fn tile_count(&self) -> usize {
        self.melds.iter().map(|m| m.tiles.len()).sum::<usize>() + self.leftover.is_some() as usize
    }
}

/// Find every way to group `hand` into melds leaving at most one tile over.
///
/// Tiles are placed one at a time, depth first:
/// 1. After an incomplete meld, only the three smallest remaining tiles at or
///    above the last placed tile are tried; otherwise every remaining tile is.
/// 2. Each tried tile is merged into the last meld when that strictly raises
///    its level, or starts a new single.
/// 3. A grouping is recorded once every tile is placed or at most one remains.
///
/// An empty hand yields no groupings.
pub fn resolve_groupings(hand: &[Tile]) -> Vec<Candidate> {
    resolve_groupings_traced(hand, &mut NoTrace)
}

/// [`resolve_groupings`] reporting each search step to `sink`
pub fn resolve_groupings_traced(hand: &[Tile], sink: &mut dyn TraceSink) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let Some(&first) = hand.first() else {
        return candidates;
    };

    let counts: Hand = hand.iter().copied().collect();
    let mut remaining = counts.clone();
    let mut melds = Vec::new();

    explore(0, hand, &counts, &mut melds, first, &mut remaining, sink, &mut candidates);

    sink.trace(format_args!("{} groupings for {} tiles", candidates.len(), hand.len()));
    candidates
}

#[allow(clippy::too_many_arguments)]
fn explore(
    depth: usize,
    hand: &[Tile],
    counts: &Hand,
    melds: &mut Vec<Meld>,
    base: Tile,
    remaining: &mut Hand,
    sink: &mut dyn TraceSink,
    candidates: &mut Vec<Candidate>,
) {
    sink.trace(format_args!(
        "- depth={} base={} melds={} remaining={}",
        depth,
        base,
        MeldList(melds.as_slice()),
        remaining
    ));

    if depth == hand.len() || remaining.total() <= 1 {
        let leftover = remaining.iter().find(|&(_, &c)| c > 0).map(|(&tile, _)| tile);
        sink.trace(format_args!("- grouping found: {} leftover={:?}", MeldList(melds.as_slice()), leftover));
        candidates.push(Candidate {
            hand: hand.to_vec(),
            counts: counts.clone(),
            melds: melds.clone(),
            leftover,
        });
        return;
    }

    for tile in next_tiles(remaining, base, melds.last()) {
        let merged = melds
            .last()
            .and_then(|last| last.extended(tile).filter(|m| m.level() > last.level()));

        // The meld displaced by a merge, restored on the way back
        let replaced = match merged {
            Some(meld) => {
                sink.trace(format_args!("- merge {} into {}", tile, meld));
                let previous = melds.pop();
                melds.push(meld);
                previous
            }
            None => {
                melds.push(Meld::single(tile));
                None
            }
        };
        remaining.remove(&tile);

        explore(depth + 1, hand, counts, melds, tile, remaining, sink, candidates);

        // Backtrack
        remaining.add(tile);
        melds.pop();
        if let Some(previous) = replaced {
            melds.push(previous);
        }
    }
}

/// Tiles worth trying next. An incomplete last meld can only be finished by
/// tiles at or just above `base`.
fn next_tiles(remaining: &Hand, base: Tile, last: Option<&Meld>) -> Vec<Tile> {
    let available = remaining.iter().filter(|&(_, &c)| c > 0).map(|(&tile, _)| tile);
    match last {
        Some(meld) if meld.is_missing() => available.filter(|&tile| tile >= base).take(3).collect(),
        _ => available.collect(),
    }
}

struct MeldList<'a>(&'a [Meld]);

impl fmt::Display for MeldList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, meld) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", meld)?;
        }
        write!(f, "]")
    }
}
