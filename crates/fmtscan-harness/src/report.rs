//! Conformance report generation.

use serde::Serialize;

use crate::error::HarnessError;
use crate::verify::VerificationSummary;

/// Machine- and human-readable conformance report.
#[derive(Debug, Clone, Serialize)]
pub struct ConformanceReport {
    /// Fixture family the report covers.
    pub family: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub summary: VerificationSummary,
}

impl ConformanceReport {
    #[must_use]
    pub fn new(family: impl Into<String>, summary: VerificationSummary) -> Self {
        Self {
            family: family.into(),
            total: summary.total,
            passed: summary.passed,
            failed: summary.failed,
            summary,
        }
    }

    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# Conformance report: {}\n\n", self.family));
        out.push_str(&format!(
            "{} cases, {} passed, {} failed\n\n",
            self.total, self.passed, self.failed
        ));
        out.push_str("| case | status |\n|------|--------|\n");
        for result in &self.summary.results {
            let status = if result.passed { "pass" } else { "FAIL" };
            out.push_str(&format!("| {} | {} |\n", result.case_name, status));
        }
        for result in self.summary.results.iter().filter(|r| !r.passed) {
            out.push_str(&format!("\n## {}\n\n", result.case_name));
            out.push_str(&format!("expected: `{}`\n", result.expected));
            out.push_str(&format!("actual:   `{}`\n", result.actual));
            if let Some(diff) = &result.diff {
                out.push_str(&format!("\n```\n{diff}\n```\n"));
            }
        }
        out
    }

    /// Render the report as pretty JSON.
    pub fn to_json(&self) -> Result<String, HarnessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
