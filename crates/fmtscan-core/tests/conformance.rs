//! Cross-engine conformance tests: properties that tie the two formatters
//! and the scanner together.

use fmtscan_core::{Arg, ArgList, MAX_ARGS, SCAN_FAIL, args, format_braces, format_percent, scan_str};

fn braces(fmt: &[u8], args: &mut ArgList<'_>) -> String {
    let mut buf = [0u8; 256];
    let n = format_braces(Some(&mut buf), fmt, args);
    String::from_utf8(buf[..n].to_vec()).unwrap()
}

fn percent(fmt: &[u8], args: &mut ArgList<'_>) -> String {
    let mut buf = [0u8; 256];
    let n = format_percent(Some(&mut buf), fmt, args);
    String::from_utf8(buf[..n].to_vec()).unwrap()
}

#[test]
fn brace_and_percent_default_integers_agree() {
    for value in [0i64, 1, -1, 42, -34, 99999, i64::MAX, i64::MIN] {
        let from_braces = braces(b"{0}", &mut args![value]);
        let from_percent = percent(b"%d", &mut args![value]);
        assert_eq!(from_braces, from_percent, "value {value}");
    }
}

#[test]
fn integer_render_scan_roundtrip_all_bases() {
    let mut buf = [0u8; 64];
    for value in [1i64, 9, 777, 65535, 123456789] {
        let pairs: [(&[u8], &[u8]); 3] =
            [(b"%d", b"%d"), (b"%o", b"%o"), (b"%x", b"%x")];
        for (fmt, scan_fmt) in pairs {
            let n = format_percent(Some(&mut buf), fmt, &mut args![value]);
            let mut back = 0i64;
            assert_eq!(scan_str(&buf[..n], scan_fmt, &mut args![&mut back]), 1);
            assert_eq!(back, value, "fmt {}", String::from_utf8_lossy(fmt));
        }
    }
}

#[test]
fn idempotent_decimal_roundtrip_across_widths() {
    let mut buf = [0u8; 64];
    for value in [0i32, 5, -5, 30000, -30000, i32::MAX, i32::MIN] {
        let n = format_percent(Some(&mut buf), b"%d", &mut args![value]);
        let mut back = 0i32;
        assert_eq!(scan_str(&buf[..n], b"%d", &mut args![&mut back]), 1);
        assert_eq!(back, value);
    }
}

#[test]
fn reference_example_flows() {
    // The canonical example triple: both formatters and the scan inverse.
    let mut buf = [0u8; 256];
    let n = format_braces(
        Some(&mut buf),
        b"Count: {0} value: {1:F3}",
        &mut args![34i32, 123.456789f64],
    );
    assert_eq!(&buf[..n], b"Count: 34 value: 123.457");

    let n = format_percent(
        Some(&mut buf),
        b"Count: %d value: %.3f",
        &mut args![34i32, 123.456789f64],
    );
    assert_eq!(&buf[..n], b"Count: 34 value: 123.457");

    let mut count = 0i32;
    let mut value = 0f32;
    let rc = scan_str(
        &buf[..n],
        b"Count: %d value: %f",
        &mut args![&mut count, &mut value],
    );
    assert_eq!(rc, 2);
    assert_eq!(count, 34);
    assert!((value - 123.457).abs() < 1e-4);
}

#[test]
fn currency_of_integer() {
    assert_eq!(braces(b"{0:C}", &mut args![1234i32]), "$1,234");
}

#[test]
fn half_away_from_zero_rounding() {
    assert_eq!(braces(b"{0:F3}", &mut args![123.456789f64]), "123.457");
    assert_eq!(percent(b"%.0f", &mut args![0.5f64]), "1");
    assert_eq!(percent(b"%.0f", &mut args![1.5f64]), "2");
}

#[test]
fn escaped_braces_render_literal_pair() {
    assert_eq!(braces(b"{{}}", &mut args![]), "{}");
}

#[test]
fn special_floats_never_render_digits() {
    for (value, expected) in [
        (f64::NAN, "1.#NAN"),
        (f64::INFINITY, "1.#INF"),
        (f64::NEG_INFINITY, "-1.#INF"),
    ] {
        assert_eq!(percent(b"%f", &mut args![value]), expected);
        assert_eq!(braces(b"{0:F}", &mut args![value]), expected);
    }
}

#[test]
fn arg_list_overflow_is_contained() {
    let mut list = ArgList::new();
    for i in 0..MAX_ARGS {
        assert!(list.push(Arg::from(i as i32)));
    }
    assert!(!list.push(Arg::from(-1i32)));
    for i in 0..MAX_ARGS {
        assert_eq!(list.get(i).as_i32(), i as i32);
    }
}

#[test]
fn negative_alignment_always_left_justifies() {
    assert_eq!(braces(b"{0,-6}|", &mut args![42i32]), "42    |");
    assert_eq!(percent(b"%-6d|", &mut args![42i32]), "42    |");
    assert_eq!(braces(b"{0,-8:F2}|", &mut args![1.5f64]), "1.50    |");
}

#[test]
fn truncated_output_reports_full_length() {
    let mut buf = [0u8; 8];
    let n = format_percent(Some(&mut buf), b"%d and more text", &mut args![123i32]);
    assert_eq!(n, 17);
    assert_eq!(&buf, b"123 and\0");

    // Length-only mode returns the same count.
    assert_eq!(
        format_percent(None, b"%d and more text", &mut args![123i32]),
        17
    );
}

#[test]
fn scan_failure_is_distinct_from_partial_match() {
    let mut v = 0i32;
    // A failed conversion is the FAIL sentinel...
    assert_eq!(scan_str(b"abc", b"%d", &mut args![&mut v]), SCAN_FAIL);
    // ...a literal mismatch is the count so far.
    assert_eq!(scan_str(b"1 z", b"%d y", &mut args![&mut v]), 1);
}

#[test]
fn scan_writes_through_every_slot_width() {
    let mut i16v = 0i16;
    let mut u32v = 0u32;
    let mut i64v = 0i64;
    let mut f64v = 0f64;
    let rc = scan_str(
        b"1 2 3 4.5",
        b"%d %u %d %f",
        &mut args![&mut i16v, &mut u32v, &mut i64v, &mut f64v],
    );
    assert_eq!(rc, 4);
    assert_eq!((i16v, u32v, i64v), (1, 2, 3));
    assert_eq!(f64v, 4.5);
}
