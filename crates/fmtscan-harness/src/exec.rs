//! Fixture case execution against the fmtscan-core engines.

use fmtscan_core::{Arg, ArgList, format_braces, format_percent, scan_str};

use crate::error::HarnessError;
use crate::fixtures::{Engine, FixtureCase, InputValue, SlotKind};

/// Output capacity handed to the formatters.
const OUT_CAPACITY: usize = 1024;
/// Backing size for each text output slot of a scan case.
const TEXT_SLOT: usize = 256;

/// What a case produced: the rendered text (for scan cases, the extracted
/// slot values joined with `|`) and the engine's return value.
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub rendered: String,
    pub returned: i64,
}

/// Execute one fixture case.
pub fn execute_case(case: &FixtureCase) -> Result<CaseOutcome, HarnessError> {
    match case.engine {
        Engine::Braces | Engine::Percent => execute_format(case),
        Engine::Scan => execute_scan(case),
    }
}

fn execute_format(case: &FixtureCase) -> Result<CaseOutcome, HarnessError> {
    let mut list = ArgList::new();
    for value in &case.inputs {
        let pushed = match value {
            InputValue::Int(v) => list.push(Arg::from(*v)),
            InputValue::Float(v) => list.push(Arg::from(*v)),
            InputValue::Text(t) => list.push(Arg::from(t.as_str())),
        };
        if !pushed {
            return Err(HarnessError::bad_fixture(&case.name, "too many inputs"));
        }
    }

    let mut buf = [0u8; OUT_CAPACITY];
    let returned = match case.engine {
        Engine::Braces => format_braces(Some(&mut buf), case.format.as_bytes(), &mut list),
        _ => format_percent(Some(&mut buf), case.format.as_bytes(), &mut list),
    } as i64;

    Ok(CaseOutcome {
        rendered: c_text(&buf),
        returned,
    })
}

fn execute_scan(case: &FixtureCase) -> Result<CaseOutcome, HarnessError> {
    let Some(input) = case.input.as_deref() else {
        return Err(HarnessError::bad_fixture(
            &case.name,
            "scan case without input text",
        ));
    };

    let count = |kind: SlotKind| case.outputs.iter().filter(|&&s| s == kind).count();
    let mut ints = vec![0i64; count(SlotKind::Int)];
    let mut floats = vec![0f64; count(SlotKind::Float)];
    let mut texts = vec![[0u8; TEXT_SLOT]; count(SlotKind::Text)];

    let mut list = ArgList::new();
    let mut int_slots = ints.iter_mut();
    let mut float_slots = floats.iter_mut();
    let mut text_slots = texts.iter_mut();
    for kind in &case.outputs {
        let pushed = match kind {
            SlotKind::Int => int_slots.next().map(|slot| list.push(Arg::from(slot))),
            SlotKind::Float => float_slots.next().map(|slot| list.push(Arg::from(slot))),
            SlotKind::Text => text_slots
                .next()
                .map(|slot| list.push(Arg::from(&mut slot[..]))),
        };
        if pushed != Some(true) {
            return Err(HarnessError::bad_fixture(&case.name, "too many outputs"));
        }
    }

    let returned = i64::from(scan_str(input.as_bytes(), case.format.as_bytes(), &mut list));

    let mut parts = Vec::with_capacity(case.outputs.len());
    let mut int_vals = ints.iter();
    let mut float_vals = floats.iter();
    let mut text_vals = texts.iter();
    for kind in &case.outputs {
        let part = match kind {
            SlotKind::Int => int_vals.next().map(|v| v.to_string()),
            SlotKind::Float => float_vals.next().map(|v| v.to_string()),
            SlotKind::Text => text_vals.next().map(|bytes| c_text(bytes)),
        };
        if let Some(part) = part {
            parts.push(part);
        }
    }

    Ok(CaseOutcome {
        rendered: parts.join("|"),
        returned,
    })
}

/// Text up to the first NUL, as the engines' C-string consumers see it.
fn c_text(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn format_case(engine: Engine, format: &str, inputs: Vec<InputValue>) -> FixtureCase {
        FixtureCase {
            name: "case".into(),
            engine,
            format: format.into(),
            input: None,
            inputs,
            outputs: vec![],
            expected_output: String::new(),
            expected_return: 0,
        }
    }

    #[test]
    fn test_execute_braces() {
        let case = format_case(
            Engine::Braces,
            "{0} and {1:F1}",
            vec![InputValue::Int(7), InputValue::Float(2.5)],
        );
        let outcome = execute_case(&case).unwrap();
        assert_eq!(outcome.rendered, "7 and 2.5");
        assert_eq!(outcome.returned, 9);
    }

    #[test]
    fn test_execute_percent_with_text() {
        let case = format_case(
            Engine::Percent,
            "%s=%d",
            vec![InputValue::Text("n".into()), InputValue::Int(3)],
        );
        let outcome = execute_case(&case).unwrap();
        assert_eq!(outcome.rendered, "n=3");
        assert_eq!(outcome.returned, 3);
    }

    #[test]
    fn test_execute_scan() {
        let case = FixtureCase {
            name: "scan".into(),
            engine: Engine::Scan,
            format: "%d %s %f".into(),
            input: Some("42 word 1.5".into()),
            inputs: vec![],
            outputs: vec![SlotKind::Int, SlotKind::Text, SlotKind::Float],
            expected_output: String::new(),
            expected_return: 0,
        };
        let outcome = execute_case(&case).unwrap();
        assert_eq!(outcome.rendered, "42|word|1.5");
        assert_eq!(outcome.returned, 3);
    }

    #[test]
    fn test_scan_case_requires_input() {
        let case = FixtureCase {
            name: "broken".into(),
            engine: Engine::Scan,
            format: "%d".into(),
            input: None,
            inputs: vec![],
            outputs: vec![SlotKind::Int],
            expected_output: String::new(),
            expected_return: 0,
        };
        assert!(matches!(
            execute_case(&case),
            Err(HarnessError::BadFixture { .. })
        ));
    }
}
