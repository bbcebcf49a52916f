//! Brace-style formatting engine.
//!
//! Interprets .NET composite format strings: `{index[,alignment][:format]}`
//! directives with `{{` / `}}` escapes, driven as a byte-at-a-time state
//! machine over the format string. The optional format spec is a standard
//! numeric format code (`C D E F G N P X S` and lowercase forms) with an
//! optional precision/width digit run.
//!
//! Reference: .NET composite formatting and standard numeric format
//! strings (decimal separator fixed to '.', group separator to ',').

use crate::arg::{Arg, ArgList};
use crate::buffer::OutBuf;
use crate::render::{
    RenderFlags, is_special, render_float, render_float_exp, render_float_general, render_int,
    render_special, render_str,
};

/// Capture limit for one `{...:format}` spec.
const MAX_FORMAT_SPEC: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Default,
    Param,
    AlignmentStart,
    AlignmentSign,
    Alignment,
    FormatStart,
    Format,
    Convert,
    ResetAndContinue,
    Error,
    Done,
}

/// Standard numeric format code classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormatCode {
    Default,
    Currency,
    Decimal,
    Number,
    Exponent,
    FixedPoint,
    General,
    Hexadecimal,
    String,
    Percent,
    Custom,
}

/// Format `fmt` into `dest` using brace-style directives.
///
/// Returns the logical output length, which may exceed the destination
/// capacity; the destination (when present) is always NUL-terminated.
/// A structurally malformed directive stops formatting at the fault and
/// returns the total produced so far.
pub fn format_braces(mut dest: Option<&mut [u8]>, fmt: &[u8], args: &mut ArgList<'_>) -> usize {
    if let Some(d) = dest.as_deref_mut() {
        if let Some(first) = d.first_mut() {
            *first = 0;
        }
    }
    args.rewind();
    let mut out = OutBuf::new(dest);
    let total = drive(&mut out, fmt, args);
    out.terminate();
    total
}

fn read(fmt: &[u8], pos: &mut usize) -> u8 {
    let ch = fmt.get(*pos).copied().unwrap_or(0);
    *pos += 1;
    ch
}

fn peek(fmt: &[u8], pos: usize) -> u8 {
    fmt.get(pos).copied().unwrap_or(0)
}

fn capture(spec: &mut [u8; MAX_FORMAT_SPEC], len: &mut usize, ch: u8) {
    if *len + 1 < MAX_FORMAT_SPEC {
        spec[*len] = ch;
        *len += 1;
    }
}

fn drive(out: &mut OutBuf<'_>, fmt: &[u8], args: &ArgList<'_>) -> usize {
    let mut state = State::Default;
    let mut total = 0;
    let mut param_index: i32 = 0;
    let mut alignment: i32 = 0;
    let mut align_negative = false;
    let mut spec_buf = [0u8; MAX_FORMAT_SPEC];
    let mut spec_len = 0usize;
    let mut pos = 0usize;
    let mut ch = read(fmt, &mut pos);

    loop {
        if ch == 0 {
            state = State::Done;
        }
        match state {
            State::Default => {
                if ch == b'{' {
                    if peek(fmt, pos) == b'{' {
                        // Doubled brace: emit one, skip the other.
                        total += out.put(ch);
                        pos += 1;
                    } else {
                        state = State::Param;
                    }
                } else if ch == b'}' {
                    if peek(fmt, pos) == b'}' {
                        total += out.put(ch);
                        pos += 1;
                    } else {
                        // A lone closing brace has no directive to close.
                        state = State::Error;
                    }
                } else {
                    total += out.put(ch);
                }
                ch = read(fmt, &mut pos);
            }
            State::Param => {
                if ch.is_ascii_digit() {
                    param_index = 10 * param_index + i32::from(ch - b'0');
                    ch = read(fmt, &mut pos);
                } else {
                    state = State::AlignmentStart;
                }
            }
            State::AlignmentStart => {
                if ch == b',' {
                    state = State::AlignmentSign;
                    ch = read(fmt, &mut pos);
                } else {
                    state = State::FormatStart;
                }
            }
            State::AlignmentSign => {
                if ch == b'-' {
                    align_negative = true;
                    ch = read(fmt, &mut pos);
                }
                state = State::Alignment;
            }
            State::Alignment => {
                if ch.is_ascii_digit() {
                    alignment = 10 * alignment + i32::from(ch - b'0');
                    ch = read(fmt, &mut pos);
                } else {
                    if align_negative && alignment > 0 {
                        alignment = -alignment;
                    }
                    state = State::FormatStart;
                }
            }
            State::FormatStart => {
                if ch == b':' {
                    state = State::Format;
                    ch = read(fmt, &mut pos);
                } else if ch == b'}' {
                    // The closing brace is consumed in Convert.
                    state = State::Convert;
                } else {
                    state = State::Error;
                }
            }
            State::Format => {
                if ch == b'}' {
                    if peek(fmt, pos) == b'}' {
                        // Escaped brace inside the spec: capture one copy.
                        capture(&mut spec_buf, &mut spec_len, ch);
                        pos += 1;
                        ch = read(fmt, &mut pos);
                    } else {
                        state = State::Convert;
                    }
                } else {
                    capture(&mut spec_buf, &mut spec_len, ch);
                    ch = read(fmt, &mut pos);
                }
            }
            State::Convert => {
                if ch == b'}' {
                    total += braced_directive(
                        out,
                        param_index,
                        alignment,
                        &spec_buf[..spec_len],
                        args,
                    );
                    state = State::ResetAndContinue;
                } else {
                    state = State::Error;
                }
                ch = read(fmt, &mut pos);
            }
            State::ResetAndContinue => {
                state = State::Default;
                param_index = 0;
                alignment = 0;
                align_negative = false;
                spec_len = 0;
            }
            State::Error | State::Done => break,
        }
    }
    total
}

/// Resolve and emit one `{index[,alignment][:format]}` directive.
fn braced_directive(
    out: &mut OutBuf<'_>,
    param_index: i32,
    alignment: i32,
    spec: &[u8],
    args: &ArgList<'_>,
) -> usize {
    let mut total = 0;

    // Out-of-range indices consume the directive without output.
    if param_index < 0 || param_index >= args.len() as i32 {
        return total;
    }

    let mut flags = RenderFlags::default();
    let mut alignment = alignment;
    if alignment < 0 {
        flags.left_justify = true;
        alignment = -alignment;
    }

    let arg = args.get(param_index as usize);
    if let Arg::Char(c) = arg {
        let (code, max) = parse_numeric_format(spec, &mut flags);
        match code {
            FormatCode::Number | FormatCode::Decimal => {
                total += render_int(out, arg.as_i64(), 10, alignment, max, flags);
            }
            FormatCode::Hexadecimal => {
                total += render_int(out, arg.as_i64(), 16, alignment, max, flags);
            }
            _ => {
                total += render_str(out, Some(&[*c]), flags, alignment, max);
            }
        }
    } else if let Arg::Str(s) = arg {
        let (code, max) = parse_numeric_format(spec, &mut flags);
        match code {
            // Numeric reinterpretation of a string argument yields its
            // as_i64 value (zero), not the string content.
            FormatCode::Hexadecimal => {
                total += render_int(out, arg.as_i64(), 16, alignment, max, flags);
            }
            _ => {
                total += render_str(out, Some(s), flags, alignment, max);
            }
        }
    } else if arg.is_integer() {
        let (code, max) = parse_numeric_format(spec, &mut flags);
        match code {
            FormatCode::Currency => {
                total += out.put(b'$');
                total += render_int(out, arg.as_i64(), 10, alignment, max, flags.grouped());
            }
            FormatCode::Hexadecimal => {
                total += render_int(out, arg.as_i64(), 16, alignment, max, flags);
            }
            _ => {
                total += render_int(out, arg.as_i64(), 10, alignment, max, flags);
            }
        }
    } else if arg.is_float() {
        let (code, mut max) = parse_numeric_format(spec, &mut flags);
        let value = arg.as_f64();
        match code {
            FormatCode::Currency => {
                if max == -1 {
                    max = 2;
                }
                if is_special(value) {
                    total += render_special(out, value, flags.upper());
                } else {
                    total += out.put(b'$');
                    total += render_float(out, value, alignment, max, flags.grouped(), false, true);
                }
            }
            FormatCode::Percent => {
                if max == -1 {
                    max = 2;
                }
                if is_special(value) {
                    total += render_special(out, value, flags.upper());
                } else {
                    total += render_float(out, value * 100.0, alignment, max, flags, false, true);
                    total += out.put(b'%');
                }
            }
            FormatCode::FixedPoint => {
                if is_special(value) {
                    total += render_special(out, value, flags.upper());
                } else {
                    total += render_float(out, value, alignment, max, flags, false, true);
                }
            }
            FormatCode::Exponent => {
                total += render_float_exp(out, value, alignment, max, flags, true);
            }
            FormatCode::Number => {
                total += render_float(out, value, alignment, max, flags, false, true);
            }
            _ => {
                total += render_float_general(out, value, alignment, max, flags, true);
            }
        }
    } else if matches!(arg, Arg::Ptr(_) | Arg::OutRaw(_)) {
        let (code, max) = parse_numeric_format(spec, &mut flags);
        match code {
            FormatCode::Decimal => {
                total += render_int(out, arg.as_i64(), 10, alignment, max, flags);
            }
            _ => {
                total += render_int(out, arg.as_i64(), 16, alignment, max, flags);
            }
        }
    }

    total
}

/// Parse a standard numeric format code: one classifying letter (case
/// selects the uppercase flag) followed by an optional precision/width
/// digit run. Unknown leading letters classify as custom and end parsing.
fn parse_numeric_format(spec: &[u8], flags: &mut RenderFlags) -> (FormatCode, i32) {
    let Some(&letter) = spec.first() else {
        return (FormatCode::Default, -1);
    };

    let code = match letter {
        b'c' | b'C' => FormatCode::Currency,
        b'd' => FormatCode::Decimal,
        b'D' => {
            flags.uppercase = true;
            FormatCode::Decimal
        }
        b'n' => {
            flags.separators = true;
            FormatCode::Number
        }
        b'N' => {
            flags.uppercase = true;
            flags.separators = true;
            FormatCode::Number
        }
        b'f' => FormatCode::FixedPoint,
        b'F' => {
            flags.uppercase = true;
            FormatCode::FixedPoint
        }
        b'g' => FormatCode::General,
        b'G' => {
            flags.uppercase = true;
            FormatCode::General
        }
        b'e' => FormatCode::Exponent,
        b'E' => {
            flags.uppercase = true;
            FormatCode::Exponent
        }
        b'p' => FormatCode::Percent,
        b'P' => {
            flags.uppercase = true;
            FormatCode::Percent
        }
        b'x' => FormatCode::Hexadecimal,
        b'X' => {
            flags.uppercase = true;
            FormatCode::Hexadecimal
        }
        b's' => FormatCode::String,
        b'S' => {
            flags.uppercase = true;
            FormatCode::String
        }
        _ => return (FormatCode::Custom, -1),
    };

    let mut max = -1;
    for &d in &spec[1..] {
        if !d.is_ascii_digit() {
            break;
        }
        if max < 0 {
            max = 0;
        }
        max = 10 * max + i32::from(d - b'0');
    }
    (code, max)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    fn braces(fmt: &str, args: &mut ArgList<'_>) -> String {
        let mut buf = [0u8; 256];
        let total = format_braces(Some(&mut buf), fmt.as_bytes(), args);
        let end = buf.iter().position(|&b| b == 0).unwrap();
        assert_eq!(total, end);
        String::from_utf8(buf[..end].to_vec()).unwrap()
    }

    #[test]
    fn test_literal_passthrough() {
        assert_eq!(braces("plain text", &mut args![]), "plain text");
    }

    #[test]
    fn test_escaped_braces() {
        assert_eq!(braces("{{}}", &mut args![]), "{}");
        assert_eq!(braces("a{{b}}c", &mut args![]), "a{b}c");
        assert_eq!(braces("{{{0}}}", &mut args![7i32]), "{7}");
    }

    #[test]
    fn test_positional_arguments() {
        assert_eq!(
            braces("{1} {0}", &mut args![1i32, 2i32]),
            "2 1"
        );
        assert_eq!(braces("{0} {0}", &mut args![5i32]), "5 5");
    }

    #[test]
    fn test_default_integer() {
        assert_eq!(braces("{0}", &mut args![34i32]), "34");
        assert_eq!(braces("{0}", &mut args![-34i64]), "-34");
        assert_eq!(braces("{0}", &mut args![250u8]), "250");
    }

    #[test]
    fn test_fixed_point() {
        assert_eq!(braces("{0:F3}", &mut args![123.456789f64]), "123.457");
        assert_eq!(braces("{0:F0}", &mut args![2.6f64]), "3");
        assert_eq!(braces("{0:f1}", &mut args![-0.05f64]), "-0.1");
    }

    #[test]
    fn test_currency() {
        assert_eq!(braces("{0:C}", &mut args![1234i32]), "$1,234");
        assert_eq!(braces("{0:C}", &mut args![1234.5f64]), "$1,234.50");
        assert_eq!(braces("{0:C0}", &mut args![5.4f64]), "$5");
    }

    #[test]
    fn test_percent_code() {
        assert_eq!(braces("{0:P}", &mut args![0.125f64]), "12.50%");
        assert_eq!(braces("{0:P0}", &mut args![0.5f64]), "50%");
    }

    #[test]
    fn test_number_grouping() {
        assert_eq!(braces("{0:N}", &mut args![1234567i64]), "1,234,567");
        assert_eq!(braces("{0:N2}", &mut args![1234.5678f64]), "1,234.57");
    }

    #[test]
    fn test_hexadecimal() {
        assert_eq!(braces("{0:x}", &mut args![255i32]), "ff");
        assert_eq!(braces("{0:X4}", &mut args![255i32]), "00FF");
    }

    #[test]
    fn test_exponent_and_general() {
        assert_eq!(braces("{0:E2}", &mut args![1500.0f64]), "1.50E3");
        assert_eq!(braces("{0:G}", &mut args![3.0f64]), "3");
        assert_eq!(braces("{0:G}", &mut args![123.456789f64]), "123.456789");
    }

    #[test]
    fn test_alignment() {
        assert_eq!(braces("{0,6}", &mut args![42i32]), "    42");
        assert_eq!(braces("{0,-6}x", &mut args![42i32]), "42    x");
        assert_eq!(braces("{0,10:F2}", &mut args![-3.5f64]), "     -3.50");
        assert_eq!(braces("{0,6}", &mut args!["ab"]), "    ab");
    }

    #[test]
    fn test_string_arguments() {
        assert_eq!(braces("{0}", &mut args!["hello"]), "hello");
        assert_eq!(braces("{0:s3}", &mut args!["hello"]), "hel");
        // Hexadecimal reinterprets the argument numerically, which for a
        // byte string reads as zero.
        assert_eq!(braces("{0:X}", &mut args!["hello"]), "0");
    }

    #[test]
    fn test_char_argument() {
        assert_eq!(braces("{0}", &mut args!['Q']), "Q");
        assert_eq!(braces("{0:d}", &mut args!['A']), "65");
        assert_eq!(braces("{0:x}", &mut args!['A']), "41");
    }

    #[test]
    fn test_pointer_argument() {
        let mut list = ArgList::new();
        list.push(Arg::Ptr(0xdead));
        assert_eq!(braces("{0}", &mut list), "dead");
        assert_eq!(braces("{0:d}", &mut list), "57005");
    }

    #[test]
    fn test_out_of_range_index_skipped() {
        assert_eq!(braces("a{5}b", &mut args![1i32]), "ab");
        assert_eq!(braces("{0}{1}", &mut args![1i32]), "1");
    }

    #[test]
    fn test_special_floats() {
        assert_eq!(braces("{0:F}", &mut args![f64::NAN]), "1.#NAN");
        assert_eq!(braces("{0:F}", &mut args![f64::NEG_INFINITY]), "-1.#INF");
        assert_eq!(braces("{0:C}", &mut args![f64::INFINITY]), "1.#INF");
    }

    #[test]
    fn test_malformed_stops_at_fault() {
        assert_eq!(braces("a{0x}b", &mut args![1i32]), "a");
        assert_eq!(braces("ab}cd", &mut args![]), "ab");
    }

    #[test]
    fn test_truncation_still_counts() {
        let mut buf = [0u8; 6];
        let total = format_braces(Some(&mut buf), b"{0}", &mut args![1234567i64]);
        assert_eq!(total, 7);
        assert_eq!(&buf[..6], b"12345\0");
    }

    #[test]
    fn test_length_only() {
        let total = format_braces(None, b"{0:F2}", &mut args![1.5f64]);
        assert_eq!(total, 4);
    }
}
