//! Fixture loading and management.

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Which engine a fixture case exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Brace-style formatting (`{0:F3}`).
    Braces,
    /// Percent-style formatting (`%.3f`).
    Percent,
    /// Scan-style parsing.
    Scan,
}

/// A positional input value boxed into the argument list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Output slot type for scan cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    Int,
    Float,
    Text,
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Engine under test.
    pub engine: Engine,
    /// Format string handed to the engine.
    pub format: String,
    /// Input text (scan cases only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    /// Positional arguments (format cases only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<InputValue>,
    /// Output slots to allocate (scan cases only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<SlotKind>,
    /// Expected rendered text. For scan cases this is the extracted slot
    /// values joined with `|`.
    pub expected_output: String,
    /// Expected return value: logical length for the formatters,
    /// conversion count (or -1) for the scanner.
    pub expected_return: i64,
}

/// A collection of fixture cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Fixture family name.
    pub family: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load a fixture set from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, HarnessError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the fixture set to pretty JSON.
    pub fn to_json(&self) -> Result<String, HarnessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a fixture set from a file path.
    pub fn from_file(path: &std::path::Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
