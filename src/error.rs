use crate::Tile;
use std::fmt;

/// Errors reported to callers of the analysis entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Wildcard count is negative, or hand size plus wildcards is not 13.
    InvalidHandSize { tiles: usize, wildcards: i32 },
    /// A tile or hand string could not be parsed.
    InvalidTile(String),
    /// More than four copies of one tile.
    TooManyCopies(Tile),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidHandSize { tiles, wildcards } if *wildcards < 0 => {
                write!(f, "invalid hand size: wildcard count {} is negative ({} tiles)", wildcards, tiles)
            }
            AnalysisError::InvalidHandSize { tiles, wildcards } => write!(
                f,
                "invalid hand size: {} tiles + {} wildcards must total 13",
                tiles, wildcards
            ),
            AnalysisError::InvalidTile(msg) => write!(f, "invalid tile: {}", msg),
            AnalysisError::TooManyCopies(tile) => write!(f, "more than 4 copies of {}", tile),
        }
    }
}

impl std::error::Error for AnalysisError {}
