use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub mod error;
pub mod report;
pub mod resolver;
pub mod trace;
pub mod waits;
#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

pub use error::AnalysisError;
pub use resolver::{Candidate, resolve_groupings, resolve_groupings_traced};
pub use trace::{NoTrace, StderrTrace, TraceSink};
pub use waits::{is_complete, winning_candidates, winning_candidates_traced};

/// Size of the dense tile index space: three suits of ten slots each.
/// Slot 0 of every suit is unused, so indices 0, 10 and 20 never hold a tile.
pub const TILE_INDEX_SPAN: usize = 30;

/// Copies of every tile in a full set
pub const MAX_COPIES: u8 = 4;

/// One of the three numbered tile families
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    /// Characters, written with the letter `m`
    Characters,
    /// Circles, written with the letter `p`
    Circles,
    /// Bamboo, written with the letter `s`
    Bamboo,
}

impl Suit {
    pub const ALL: [Suit; 3] = [Suit::Characters, Suit::Circles, Suit::Bamboo];

    /// Offset added to a rank to get the tile index
    pub fn base(self) -> u8 {
        match self {
            Suit::Characters => 0,
            Suit::Circles => 10,
            Suit::Bamboo => 20,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Suit::Characters => 'm',
            Suit::Circles => 'p',
            Suit::Bamboo => 's',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'm' => Some(Suit::Characters),
            'p' => Some(Suit::Circles),
            's' => Some(Suit::Bamboo),
            _ => None,
        }
    }
}

/// A tile stored as its dense index: `suit.base() + rank`.
///
/// Ordering follows the index, so all Characters sort before all Circles,
/// and ranks ascend within a suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile(u8);

impl Tile {
    /// Create a tile from a suit and a rank (1-9)
    pub fn new(suit: Suit, rank: u8) -> Self {
        assert!((1..=9).contains(&rank), "Rank must be 1-9");
        Tile(suit.base() + rank)
    }

    /// Reverse lookup from a dense index, or None for gaps and out-of-range values
    pub fn from_index(index: usize) -> Option<Self> {
        if index < TILE_INDEX_SPAN && index % 10 != 0 {
            Some(Tile(index as u8))
        } else {
            None
        }
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn suit(&self) -> Suit {
        match self.0 / 10 {
            0 => Suit::Characters,
            1 => Suit::Circles,
            _ => Suit::Bamboo,
        }
    }

    pub fn rank(&self) -> u8 {
        self.0 % 10
    }

    /// The tile one rank higher in the same suit, if any
    pub fn next_in_suit(&self) -> Option<Self> {
        if self.rank() < 9 { Some(Tile(self.0 + 1)) } else { None }
    }

    /// Every tile of the universe in index order
    pub fn all() -> impl Iterator<Item = Tile> {
        (0..TILE_INDEX_SPAN).filter_map(Tile::from_index)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit().letter())
    }
}

impl FromStr for Tile {
    type Err = AnalysisError;

    /// Format: "5p" (rank followed by suit letter)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(rank), Some(letter), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(AnalysisError::InvalidTile(s.to_string()));
        };
        let rank = rank
            .to_digit(10)
            .filter(|r| (1..=9).contains(r))
            .ok_or_else(|| AnalysisError::InvalidTile(s.to_string()))?;
        let suit = Suit::from_letter(letter).ok_or_else(|| AnalysisError::InvalidTile(s.to_string()))?;
        Ok(Tile::new(suit, rank as u8))
    }
}

/// Parse a hand in compact notation, e.g. "123m456p 11s".
///
/// Digits accumulate until a suit letter assigns them a suit. Input order is
/// preserved. More than four copies of one tile is rejected.
pub fn parse_tiles(input: &str) -> Result<Vec<Tile>, AnalysisError> {
    let mut tiles = Vec::new();
    let mut pending: Vec<u8> = Vec::new();

    for c in input.chars() {
        if c.is_whitespace() {
            continue;
        }
        if let Some(rank) = c.to_digit(10) {
            if rank == 0 {
                return Err(AnalysisError::InvalidTile(format!("rank 0 in '{}'", input)));
            }
            pending.push(rank as u8);
            continue;
        }
        let Some(suit) = Suit::from_letter(c) else {
            return Err(AnalysisError::InvalidTile(format!("unknown character '{}' in '{}'", c, input)));
        };
        if pending.is_empty() {
            return Err(AnalysisError::InvalidTile(format!("suit '{}' without ranks in '{}'", c, input)));
        }
        tiles.extend(pending.drain(..).map(|rank| Tile::new(suit, rank)));
    }

    if !pending.is_empty() {
        return Err(AnalysisError::InvalidTile(format!("ranks without a suit in '{}'", input)));
    }

    Hand::from_tiles(&tiles)?;
    Ok(tiles)
}

/// Shape of a meld
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MeldType {
    /// A lone tile waiting for partners
    Single,
    /// Two identical tiles
    Pair,
    /// Two consecutive tiles of one suit, waiting for the third of a sequence
    Partial,
    /// Three identical tiles
    Triplet,
    /// Three consecutive tiles of one suit
    Sequence,
}

impl MeldType {
    /// Quality score: complete melds of three outrank pairs and partials,
    /// which outrank singles.
    pub fn level(self) -> u8 {
        match self {
            MeldType::Single => 0,
            MeldType::Pair | MeldType::Partial => 1,
            MeldType::Triplet | MeldType::Sequence => 2,
        }
    }

    /// Incomplete shapes that the resolver tries to extend with nearby ranks
    pub fn is_missing(self) -> bool {
        matches!(self, MeldType::Single | MeldType::Partial)
    }

    pub fn name(self) -> &'static str {
        match self {
            MeldType::Single => "single",
            MeldType::Pair => "pair",
            MeldType::Partial => "partial",
            MeldType::Triplet => "triplet",
            MeldType::Sequence => "sequence",
        }
    }
}

/// A grouping of tiles built by the resolver
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Meld {
    pub meld_type: MeldType,
    /// Tiles in ascending order
    pub tiles: Vec<Tile>,
}

impl Meld {
    pub fn single(tile: Tile) -> Self {
        Meld {
            meld_type: MeldType::Single,
            tiles: vec![tile],
        }
    }

    pub fn level(&self) -> u8 {
        self.meld_type.level()
    }

    pub fn is_missing(&self) -> bool {
        self.meld_type.is_missing()
    }

    /// Classify this meld's tiles plus one more
    pub fn extended(&self, tile: Tile) -> Option<Meld> {
        let mut tiles = self.tiles.clone();
        tiles.push(tile);
        make_meld(&tiles)
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.meld_type.name())?;
        for (i, tile) in self.tiles.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", tile)?;
        }
        write!(f, "]")
    }
}

/// Classify 1-3 tiles, taken as a multiset, into a meld.
///
/// Returns None when the tiles form no shape; callers treat that as
/// "do not merge".
pub fn make_meld(tiles: &[Tile]) -> Option<Meld> {
    let mut sorted = tiles.to_vec();
    sorted.sort_unstable();

    let meld_type = match sorted.as_slice() {
        [_] => MeldType::Single,
        [a, b] if a == b => MeldType::Pair,
        [a, b] if a.next_in_suit() == Some(*b) => MeldType::Partial,
        [a, b, c] if a == b && b == c => MeldType::Triplet,
        [a, b, c] if a.next_in_suit() == Some(*b) && b.next_in_suit() == Some(*c) => MeldType::Sequence,
        _ => return None,
    };

    Some(Meld {
        meld_type,
        tiles: sorted,
    })
}

/// Ordered tile -> remaining quantity map. Zero entries are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand(pub BTreeMap<Tile, u8>);

impl Hand {
    /// No tiles held
    pub fn new() -> Self {
        Hand(BTreeMap::new())
    }

    /// Count a list of tiles, rejecting more than four copies of any tile
    pub fn from_tiles(tiles: &[Tile]) -> Result<Self, AnalysisError> {
        let mut hand = Hand::new();
        for &tile in tiles {
            if hand.count(&tile) >= MAX_COPIES {
                return Err(AnalysisError::TooManyCopies(tile));
            }
            hand.add(tile);
        }
        Ok(hand)
    }

    /// One more copy of `tile`
    pub fn add(&mut self, tile: Tile) {
        *self.0.entry(tile).or_insert(0) += 1;
    }

    /// Take one copy of `tile` out; `false` when none remain
    pub fn remove(&mut self, tile: &Tile) -> bool {
        if let Some(count) = self.0.get_mut(tile) {
            if *count > 0 {
                *count -= 1;
                if *count == 0 {
                    self.0.remove(tile);
                }
                return true;
            }
        }
        false
    }

    /// Remaining copies of `tile`
    pub fn count(&self, tile: &Tile) -> u8 {
        self.0.get(tile).copied().unwrap_or(0)
    }

    /// Total number of tiles held
    pub fn total(&self) -> usize {
        self.0.values().map(|&c| c as usize).sum()
    }

    /// Held tiles with their copy counts, in index order
    pub fn iter(&self) -> impl Iterator<Item = (&Tile, &u8)> {
        self.0.iter()
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (tile, count)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}x{}", tile, count)?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<Tile> for Hand {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        let mut hand = Hand::new();
        for tile in iter {
            hand.add(tile);
        }
        hand
    }
}
