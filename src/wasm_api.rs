use crate::report::{self, GroupQuery, GroupReport, WaitQuery, WaitReport};
use crate::trace::ConsoleTrace;
use crate::{NoTrace, TraceSink};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn sink_for(trace: bool) -> Box<dyn TraceSink> {
    if trace { Box::new(ConsoleTrace) } else { Box::new(NoTrace) }
}

/// Group a hand into melds
///
/// # Arguments
/// * `query` - JSON GroupQuery (e.g., {"hand": ["1m", "1m", "2m", "3m"]})
/// * `trace` - Log every search step to the browser console
///
/// # Returns
/// JSON string with GroupReport containing success, candidates, or error
#[wasm_bindgen]
pub fn analyze_groupings(query: &str, trace: bool) -> String {
    let report = match serde_json::from_str::<GroupQuery>(query) {
        Ok(query) => report::run_group_query(&query, sink_for(trace).as_mut()),
        Err(e) => GroupReport {
            success: false,
            candidates: None,
            error: Some(format!("Invalid query JSON: {}", e)),
            elapsed_ms: 0.0,
        },
    };
    serde_json::to_string(&report)
        .unwrap_or_else(|e| format!(r#"{{"success":false,"error":"Serialization error: {}"}}"#, e))
}

/// Find the tiles that complete a 13-tile hand
///
/// # Arguments
/// * `query` - JSON WaitQuery (e.g., {"hand": ["1112345678999m"], "wildcards": 0})
/// * `trace` - Log every probe to the browser console
///
/// # Returns
/// JSON string with WaitReport containing success, waits, or error
#[wasm_bindgen]
pub fn analyze_waits(query: &str, trace: bool) -> String {
    let report = match serde_json::from_str::<WaitQuery>(query) {
        Ok(query) => report::run_wait_query(&query, sink_for(trace).as_mut()),
        Err(e) => WaitReport {
            success: false,
            waits: None,
            error: Some(format!("Invalid query JSON: {}", e)),
            elapsed_ms: 0.0,
        },
    };
    serde_json::to_string(&report)
        .unwrap_or_else(|e| format!(r#"{{"success":false,"error":"Serialization error: {}"}}"#, e))
}

/// Get the git commit hash that this WASM module was built from
///
/// Returns the first 8 characters of the commit hash, or "unknown" if not available
#[wasm_bindgen]
pub fn get_build_commit() -> String {
    env!("BUILD_COMMIT").to_string()
}
