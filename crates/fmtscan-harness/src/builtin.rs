//! Built-in fixture set.
//!
//! A reference corpus covering the engines' core behaviors: default and
//! formatted rendering, grouping, padding, escapes, the `#err#` and
//! special-value substitutions, and scan extraction including the partial
//! and failing return conventions.

use crate::fixtures::{Engine, FixtureCase, FixtureSet, InputValue, SlotKind};

fn format_case(
    name: &str,
    engine: Engine,
    format: &str,
    inputs: Vec<InputValue>,
    expected: &str,
) -> FixtureCase {
    FixtureCase {
        name: name.into(),
        engine,
        format: format.into(),
        input: None,
        inputs,
        outputs: vec![],
        expected_output: expected.into(),
        expected_return: expected.len() as i64,
    }
}

fn scan_case(
    name: &str,
    input: &str,
    format: &str,
    outputs: Vec<SlotKind>,
    expected: &str,
    expected_return: i64,
) -> FixtureCase {
    FixtureCase {
        name: name.into(),
        engine: Engine::Scan,
        format: format.into(),
        input: Some(input.into()),
        inputs: vec![],
        outputs,
        expected_output: expected.into(),
        expected_return,
    }
}

/// The built-in reference fixture set.
#[must_use]
pub fn builtin_fixtures() -> FixtureSet {
    use Engine::{Braces, Percent};
    use InputValue::{Float, Int, Text};

    let cases = vec![
        format_case("braces_int_default", Braces, "{0}", vec![Int(34)], "34"),
        format_case(
            "braces_example_pair",
            Braces,
            "Count: {0} value: {1:F3}",
            vec![Int(34), Float(123.456789)],
            "Count: 34 value: 123.457",
        ),
        format_case(
            "braces_currency_int",
            Braces,
            "{0:C}",
            vec![Int(1234)],
            "$1,234",
        ),
        format_case(
            "braces_currency_float",
            Braces,
            "{0:C}",
            vec![Float(1234.5)],
            "$1,234.50",
        ),
        format_case(
            "braces_percent_code",
            Braces,
            "{0:P0}",
            vec![Float(0.5)],
            "50%",
        ),
        format_case("braces_escaped", Braces, "{{}}", vec![], "{}"),
        format_case(
            "braces_alignment",
            Braces,
            "{0,6}",
            vec![Int(42)],
            "    42",
        ),
        format_case(
            "braces_hex_padded",
            Braces,
            "{0:X4}",
            vec![Int(255)],
            "00FF",
        ),
        format_case(
            "percent_example_pair",
            Percent,
            "Count: %d value: %.3f",
            vec![Int(34), Float(123.456789)],
            "Count: 34 value: 123.457",
        ),
        format_case("percent_zero_pad", Percent, "%05d", vec![Int(42)], "00042"),
        format_case("percent_hex", Percent, "%x", vec![Int(255)], "ff"),
        format_case(
            "percent_string_width",
            Percent,
            "%8s",
            vec![Text("hi".into())],
            "      hi",
        ),
        format_case(
            "percent_string_mismatch",
            Percent,
            "%s",
            vec![Int(42)],
            "#err#",
        ),
        format_case(
            "percent_grouping",
            Percent,
            "%'d",
            vec![Int(1234567)],
            "1,234,567",
        ),
        scan_case(
            "scan_example_pair",
            "Count: 34 value: 123.457",
            "Count: %d value: %f",
            vec![SlotKind::Int, SlotKind::Float],
            "34|123.457",
            2,
        ),
        scan_case(
            "scan_bases",
            "ff 17",
            "%x %o",
            vec![SlotKind::Int, SlotKind::Int],
            "255|15",
            2,
        ),
        scan_case(
            "scan_string",
            "hello world",
            "%s",
            vec![SlotKind::Text],
            "hello",
            1,
        ),
        scan_case(
            "scan_literal_mismatch",
            "1 x",
            "%d y",
            vec![SlotKind::Int],
            "1",
            1,
        ),
        scan_case("scan_failure", "abc", "%d", vec![SlotKind::Int], "0", -1),
    ];

    FixtureSet {
        version: "v1".into(),
        family: "fmtscan".into(),
        cases,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_serializes() {
        let set = builtin_fixtures();
        assert!(set.cases.len() >= 15);
        let json = set.to_json().unwrap();
        let back = FixtureSet::from_json(&json).unwrap();
        assert_eq!(back.cases.len(), set.cases.len());
    }
}
