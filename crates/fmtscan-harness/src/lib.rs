//! Conformance testing harness for fmtscan.
//!
//! This crate provides:
//! - Fixture model: format/scan cases as JSON reference data
//! - Case execution: run fixtures against the fmtscan-core engines
//! - Verification: compare actual output and return values, with diffs
//! - Report generation: human-readable + machine-readable summaries
//! - Structured JSONL logging of verification outcomes

#![forbid(unsafe_code)]

pub mod builtin;
pub mod diff;
pub mod error;
pub mod exec;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use error::HarnessError;
pub use fixtures::{Engine, FixtureCase, FixtureSet, InputValue, SlotKind};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::{VerificationResult, VerificationSummary};
