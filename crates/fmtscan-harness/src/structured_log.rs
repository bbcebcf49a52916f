//! Structured logging for harness runs.
//!
//! Emits one JSON object per line so verification runs can be aggregated
//! and diffed by ordinary log tooling.

use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Severity level for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Verification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
    Error,
}

/// Canonical structured log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Seconds since the Unix epoch at creation time.
    pub timestamp: u64,
    pub level: LogLevel,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LogEntry {
    /// Create a new entry with required fields only.
    #[must_use]
    pub fn new(level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            timestamp: now_epoch_secs(),
            level,
            event: event.into(),
            case: None,
            outcome: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_case(mut self, case: impl Into<String>) -> Self {
        self.case = Some(case.into());
        self
    }

    #[must_use]
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Writes JSONL lines to any sink.
pub struct LogEmitter<W: Write> {
    sink: W,
}

impl<W: Write> LogEmitter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Serialize and write one entry as a single line.
    pub fn emit(&mut self, entry: &LogEntry) -> Result<(), HarnessError> {
        let line = serde_json::to_string(entry)?;
        writeln!(self.sink, "{line}")?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_one_line_per_entry() {
        let mut emitter = LogEmitter::new(Vec::new());
        emitter
            .emit(
                &LogEntry::new(LogLevel::Info, "case_verified")
                    .with_case("int_basic")
                    .with_outcome(Outcome::Pass),
            )
            .unwrap();
        emitter
            .emit(&LogEntry::new(LogLevel::Error, "run_failed"))
            .unwrap();
        let text = String::from_utf8(emitter.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 2);
        let first: LogEntry = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(first.case.as_deref(), Some("int_basic"));
        assert_eq!(first.outcome, Some(Outcome::Pass));
    }
}
