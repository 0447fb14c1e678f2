//! Diagnostic sinks for the search engines.
//!
//! Messages arrive as `fmt::Arguments` so nothing is formatted unless the
//! sink keeps it. A sink only observes; it never influences a search.

use std::fmt;

pub trait TraceSink {
    fn trace(&mut self, message: fmt::Arguments<'_>);
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl TraceSink for NoTrace {
    fn trace(&mut self, _message: fmt::Arguments<'_>) {}
}

/// Writes each message to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrTrace;

impl TraceSink for StderrTrace {
    fn trace(&mut self, message: fmt::Arguments<'_>) {
        eprintln!("{}", message);
    }
}

/// Collects formatted messages
impl TraceSink for Vec<String> {
    fn trace(&mut self, message: fmt::Arguments<'_>) {
        self.push(message.to_string());
    }
}

/// Writes each message to the browser console
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleTrace;

#[cfg(target_arch = "wasm32")]
impl TraceSink for ConsoleTrace {
    fn trace(&mut self, message: fmt::Arguments<'_>) {
        web_sys::console::log_1(&message.to_string().into());
    }
}
