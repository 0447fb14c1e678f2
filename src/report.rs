//! JSON queries and reports shared by the command line and the wasm API.

use crate::{AnalysisError, Candidate, Meld, MeldType, Tile, TraceSink, parse_tiles};
use serde::{Deserialize, Serialize};

/// Cross-platform stopwatch for reporting search time
#[derive(Clone, Copy)]
pub struct Stopwatch {
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
    #[cfg(target_arch = "wasm32")]
    start_ms: f64,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            start: std::time::Instant::now(),
            #[cfg(target_arch = "wasm32")]
            start_ms: now_ms(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.start.elapsed().as_secs_f64() * 1000.0
        }
        #[cfg(target_arch = "wasm32")]
        {
            now_ms() - self.start_ms
        }
    }
}

/// High resolution clock when the page exposes one, wall clock otherwise
#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Request to group a hand into melds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupQuery {
    /// Tile strings, e.g. ["1m", "2m", "3m"]
    pub hand: Vec<String>,
}

/// Request to find the winning tiles of a 13-tile hand
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitQuery {
    /// Tile strings, e.g. ["1m", "1m", "1m", "2m"]
    pub hand: Vec<String>,
    /// Unspecified filler tiles counted toward the 13
    #[serde(default)]
    pub wildcards: i32,
}

/// JSON-serializable representation of a meld
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MeldJson {
    Single { tiles: Vec<String> },
    Pair { tiles: Vec<String> },
    Partial { tiles: Vec<String> },
    Triplet { tiles: Vec<String> },
    Sequence { tiles: Vec<String> },
}

/// One grouping of a hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateJson {
    pub melds: Vec<MeldJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leftover: Option<String>,
}

/// Result of a grouping query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<CandidateJson>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_ms: f64,
}

/// Result of a winning tile query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waits: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_ms: f64,
}

/// Parse tile strings, accepting either single tiles ("5p") or compact runs ("123m")
pub fn tiles_from_strings(strings: &[String]) -> Result<Vec<Tile>, AnalysisError> {
    parse_tiles(&strings.join(" "))
}

/// Run a grouping query. Failures are reported in the result, never raised.
pub fn run_group_query(query: &GroupQuery, sink: &mut dyn TraceSink) -> GroupReport {
    let timer = Stopwatch::start();
    match tiles_from_strings(&query.hand) {
        Ok(hand) => {
            let candidates = crate::resolve_groupings_traced(&hand, sink);
            GroupReport {
                success: true,
                candidates: Some(candidates.iter().map(candidate_to_json).collect()),
                error: None,
                elapsed_ms: timer.elapsed_ms(),
            }
        }
        Err(e) => GroupReport {
            success: false,
            candidates: None,
            error: Some(e.to_string()),
            elapsed_ms: timer.elapsed_ms(),
        },
    }
}

/// Run a winning tile query. Failures are reported in the result, never raised.
pub fn run_wait_query(query: &WaitQuery, sink: &mut dyn TraceSink) -> WaitReport {
    let timer = Stopwatch::start();
    let result = tiles_from_strings(&query.hand)
        .and_then(|hand| crate::winning_candidates_traced(&hand, query.wildcards, sink));
    match result {
        Ok(waits) => WaitReport {
            success: true,
            waits: Some(waits.iter().map(|t| t.to_string()).collect()),
            error: None,
            elapsed_ms: timer.elapsed_ms(),
        },
        Err(e) => WaitReport {
            success: false,
            waits: None,
            error: Some(e.to_string()),
            elapsed_ms: timer.elapsed_ms(),
        },
    }
}

/// Convert internal Meld to JSON representation
pub fn meld_to_json(meld: &Meld) -> MeldJson {
    let tiles: Vec<String> = meld.tiles.iter().map(|t| t.to_string()).collect();

    match meld.meld_type {
        MeldType::Single => MeldJson::Single { tiles },
        MeldType::Pair => MeldJson::Pair { tiles },
        MeldType::Partial => MeldJson::Partial { tiles },
        MeldType::Triplet => MeldJson::Triplet { tiles },
        MeldType::Sequence => MeldJson::Sequence { tiles },
    }
}

pub fn candidate_to_json(candidate: &Candidate) -> CandidateJson {
    CandidateJson {
        melds: candidate.melds.iter().map(meld_to_json).collect(),
        leftover: candidate.leftover.map(|t| t.to_string()),
    }
}
