//! Fixture execution engine.

use crate::diff::render_diff;
use crate::exec::execute_case;
use crate::fixtures::FixtureSet;
use crate::verify::{VerificationResult, VerificationSummary};

/// Runs a fixture set and collects verification results.
#[derive(Debug, Default)]
pub struct TestRunner;

impl TestRunner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Run all cases in a set and summarize the results.
    pub fn run(&self, set: &FixtureSet) -> VerificationSummary {
        let results = set
            .cases
            .iter()
            .map(|case| {
                let expected = render_outcome(&case.expected_output, case.expected_return);
                match execute_case(case) {
                    Ok(outcome) => {
                        let actual = render_outcome(&outcome.rendered, outcome.returned);
                        let passed = actual == expected;
                        let diff = if passed {
                            None
                        } else {
                            Some(render_diff(&expected, &actual))
                        };
                        VerificationResult {
                            case_name: case.name.clone(),
                            passed,
                            expected,
                            actual,
                            diff,
                        }
                    }
                    Err(err) => VerificationResult {
                        case_name: case.name.clone(),
                        passed: false,
                        expected,
                        actual: format!("error: {err}"),
                        diff: None,
                    },
                }
            })
            .collect();
        VerificationSummary::from_results(results)
    }
}

fn render_outcome(text: &str, returned: i64) -> String {
    format!("{text} [ret={returned}]")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_passes_builtin_set() {
        let set = crate::builtin::builtin_fixtures();
        let summary = TestRunner::new().run(&set);
        assert!(
            summary.all_passed(),
            "failures: {:?}",
            summary
                .results
                .iter()
                .filter(|r| !r.passed)
                .map(|r| (&r.case_name, &r.expected, &r.actual))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_runner_reports_mismatch() {
        let mut set = crate::builtin::builtin_fixtures();
        set.cases[0].expected_output = "not this".into();
        let summary = TestRunner::new().run(&set);
        assert_eq!(summary.failed, 1);
        let failed = summary.results.iter().find(|r| !r.passed).unwrap();
        assert!(failed.diff.is_some());
    }
}
