//! Injected diagnostics sink.
//!
//! Non-fatal conditions (unknown attribute names during a value push, sink kind
//! mismatches, degenerate path frames) and debug dumps go through a
//! [`Diagnostics`] implementation supplied by the caller instead of global
//! debug switches.

use serde::{Deserialize, Serialize};

pub trait Diagnostics {
    fn warn(&mut self, message: &str);
    fn debug(&mut self, message: &str);
}

/// Forwards to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warn(&mut self, message: &str) {
        log::warn!(target: "motion_key_core", "{message}");
    }

    fn debug(&mut self, message: &str) {
        log::debug!(target: "motion_key_core", "{message}");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn warn(&mut self, _message: &str) {}
    fn debug(&mut self, _message: &str) {}
}

/// Keeps every message in memory, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingDiagnostics {
    pub warnings: Vec<String>,
    pub debug: Vec<String>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.debug.is_empty()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn debug(&mut self, message: &str) {
        self.debug.push(message.to_string());
    }
}
