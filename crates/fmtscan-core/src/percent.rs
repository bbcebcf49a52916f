//! Percent-style formatting engine.
//!
//! Interprets classic `%[flags][width][.precision][size]type` directives.
//! Arguments carry their own width, so the `h`/`l`/`L` size modifiers are
//! parsed and ignored: every integer conversion runs through the 64-bit
//! renderer and every float conversion at full double precision.
//!
//! Reference: ISO C11 7.21.6.1 fprintf, minus `%n` (disabled) and `%#`
//! alternate forms (accepted, no effect). `'` / `,` flags are an
//! extension enabling thousands grouping.

use crate::arg::{Arg, ArgList};
use crate::buffer::OutBuf;
use crate::render::{
    RenderFlags, is_special, render_float, render_float_exp, render_float_general, render_int,
    render_special, render_str,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Default,
    Flags,
    Min,
    Dot,
    Max,
    Mod,
    Conv,
    Done,
}

/// Format `fmt` into `dest` using printf-style directives.
///
/// Returns the logical output length, which may exceed the destination
/// capacity; the destination (when present) is always NUL-terminated.
pub fn format_percent(mut dest: Option<&mut [u8]>, fmt: &[u8], args: &mut ArgList<'_>) -> usize {
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

fn drive(out: &mut OutBuf<'_>, fmt: &[u8], args: &mut ArgList<'_>) -> usize {
    let mut state = State::Default;
    let mut total = 0;
    let mut flags = RenderFlags::default();
    let mut min: i32 = 0;
    let mut max: i32 = -1;
    let mut pos = 0usize;
    let mut ch = read(fmt, &mut pos);

    loop {
        if ch == 0 {
            state = State::Done;
        }
        match state {
            State::Default => {
                if ch == b'%' {
                    state = State::Flags;
                } else {
                    total += out.put(ch);
                }
                ch = read(fmt, &mut pos);
            }
            State::Flags => match ch {
                b'-' => {
                    flags.left_justify = true;
                    ch = read(fmt, &mut pos);
                }
                b'+' => {
                    flags.force_sign = true;
                    ch = read(fmt, &mut pos);
                }
                b' ' => {
                    flags.space_sign = true;
                    ch = read(fmt, &mut pos);
                }
                b'#' => {
                    flags.alt_form = true;
                    ch = read(fmt, &mut pos);
                }
                b'0' => {
                    flags.zero_pad = true;
                    ch = read(fmt, &mut pos);
                }
                b'\'' | b',' => {
                    flags.separators = true;
                    ch = read(fmt, &mut pos);
                }
                _ => {
                    state = State::Min;
                }
            },
            State::Min => {
                if ch.is_ascii_digit() {
                    min = 10 * min + i32::from(ch - b'0');
                    ch = read(fmt, &mut pos);
                } else if ch == b'*' {
                    min = args.next().as_i32();
                    ch = read(fmt, &mut pos);
                    state = State::Dot;
                } else {
                    state = State::Dot;
                }
            }
            State::Dot => {
                if ch == b'.' {
                    state = State::Max;
                    ch = read(fmt, &mut pos);
                } else {
                    state = State::Mod;
                }
            }
            State::Max => {
                if ch.is_ascii_digit() {
                    if max < 0 {
                        max = 0;
                    }
                    max = 10 * max + i32::from(ch - b'0');
                    ch = read(fmt, &mut pos);
                } else if ch == b'*' {
                    max = args.next().as_i32();
                    ch = read(fmt, &mut pos);
                    state = State::Mod;
                } else {
                    state = State::Mod;
                }
            }
            State::Mod => {
                // Size modifiers are accepted and ignored.
                if matches!(ch, b'h' | b'l' | b'L') {
                    ch = read(fmt, &mut pos);
                }
                state = State::Conv;
            }
            State::Conv => {
                total += conversion(out, ch, min, max, flags, args);
                ch = read(fmt, &mut pos);
                state = State::Default;
                flags = RenderFlags::default();
                min = 0;
                max = -1;
            }
            State::Done => break,
        }
    }
    total
}

/// Dispatch one conversion letter.
fn conversion(
    out: &mut OutBuf<'_>,
    conv: u8,
    min: i32,
    max: i32,
    mut flags: RenderFlags,
    args: &mut ArgList<'_>,
) -> usize {
    let mut total = 0;
    match conv {
        b'd' | b'i' => {
            total += render_int(out, args.next().as_i64(), 10, min, max, flags);
        }
        b'o' => {
            flags.unsigned = true;
            total += render_int(out, args.next().as_i64(), 8, min, max, flags);
        }
        b'u' => {
            flags.unsigned = true;
            total += render_int(out, args.next().as_i64(), 10, min, max, flags);
        }
        b'x' | b'X' => {
            flags.unsigned = true;
            if conv == b'X' {
                flags.uppercase = true;
            }
            total += render_int(out, args.next().as_i64(), 16, min, max, flags);
        }
        b'f' => {
            let value = args.next().as_f64();
            if is_special(value) {
                total += render_special(out, value, flags.upper());
            } else {
                total += render_float(out, value, min, max, flags, false, true);
            }
        }
        b'e' | b'E' => {
            if conv == b'E' {
                flags.uppercase = true;
            }
            total += render_float_exp(out, args.next().as_f64(), min, max, flags, true);
        }
        b'g' | b'G' => {
            if conv == b'G' {
                flags.uppercase = true;
            }
            total += render_float_general(out, args.next().as_f64(), min, max, flags, true);
        }
        b'c' => {
            total += out.put(args.next().as_i32() as u8);
        }
        b's' => {
            let arg = args.next();
            let value: &[u8] = match arg {
                Arg::Str(s) => s,
                // Anything else is a type error for %s.
                _ => b"#err#",
            };
            total += render_str(out, Some(value), flags, min, max);
        }
        b'p' => {
            total += render_int(out, args.next().as_i64(), 16, min, max, flags);
        }
        b'%' => {
            total += out.put(b'%');
        }
        // 'n' and unknown letters: consumed, no output, no argument.
        _ => {}
    }
    total
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
