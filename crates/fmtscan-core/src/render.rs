//! Low-level numeric and string rendering.
//!
//! Shared by both formatters: integers in base 8/10/16 with the full
//! sign/zero/space/grouping flag set, floating point in fixed, general,
//! and exponential notation, and bounded string emission. All routines
//! honor the same min-width / max-precision / justification contract and
//! emit through [`OutBuf`], so truncation behavior is uniform.
//!
//! Floating point digits are produced by scaling the fractional part by
//! `10^precision` and rounding half away from zero; precision is capped at
//! 16 digits by that conversion method. Special values (NaN, infinities,
//! the indeterminate pattern) render as `1.#NAN` / `1.#INF` / `1.#IND`
//! tokens, never as digit strings.

use crate::buffer::OutBuf;

/// Digit conversion scratch size. 20 decimal digits for a 64-bit value
/// plus grouping separators fit comfortably.
const MAX_CONVERT: usize = 64;

const DIGITS_LOWER: &[u8; 16] = b"0123456789abcdef";
const DIGITS_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Rendering flags collected from a format directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderFlags {
    /// '-': pad on the right instead of the left.
    pub left_justify: bool,
    /// '+': emit a plus sign for non-negative values.
    pub force_sign: bool,
    /// ' ': emit a space where the sign would go for non-negative values.
    pub space_sign: bool,
    /// '#': accepted but has no rendering effect.
    pub alt_form: bool,
    /// '0': pad with zeros instead of spaces.
    pub zero_pad: bool,
    /// Upper-case hex digits and special-value tokens.
    pub uppercase: bool,
    /// Treat the integer value as unsigned.
    pub unsigned: bool,
    /// Group the integer part with ',' every three digits.
    pub separators: bool,
}

impl RenderFlags {
    /// Copy of `self` with the uppercase flag forced on.
    pub fn upper(self) -> Self {
        Self {
            uppercase: true,
            ..self
        }
    }

    /// Copy of `self` with the separator flag forced on.
    pub fn grouped(self) -> Self {
        Self {
            separators: true,
            ..self
        }
    }
}

// ---------------------------------------------------------------------------
// Special-value classification
// ---------------------------------------------------------------------------

const F64_EXP_MASK: u64 = 0x7ff0_0000_0000_0000;
const F64_MANTISSA_MASK: u64 = 0x000f_ffff_ffff_ffff;
const F64_ABS_MASK: u64 = 0x7fff_ffff_ffff_ffff;
/// The x87 "indeterminate" pattern: quiet NaN with the sign bit set and an
/// otherwise empty mantissa.
const F64_INDETERMINATE: u64 = 0xfff8_0000_0000_0000;

fn is_indeterminate(value: f64) -> bool {
    value.to_bits() == F64_INDETERMINATE
}

fn is_infinite_bits(value: f64) -> bool {
    value.to_bits() & F64_ABS_MASK == F64_EXP_MASK
}

fn is_nan_bits(value: f64) -> bool {
    let bits = value.to_bits();
    bits & F64_EXP_MASK == F64_EXP_MASK && bits & F64_MANTISSA_MASK != 0
}

fn sign_bit(value: f64) -> bool {
    value.to_bits() >> 63 != 0
}

/// True for any value that must render as a special token instead of
/// digits: NaN, +/-infinity, or the indeterminate pattern.
pub fn is_special(value: f64) -> bool {
    is_nan_bits(value) || is_infinite_bits(value) || is_indeterminate(value)
}

/// Render the special-value token for `value`.
///
/// Indeterminate is tested before NaN so it keeps its own spelling, and
/// only indeterminate/infinity carry a leading '-'.
pub fn render_special(out: &mut OutBuf<'_>, value: f64, flags: RenderFlags) -> usize {
    let mut total = 0;
    let letters: &[u8; 3] = if is_indeterminate(value) {
        if sign_bit(value) {
            total += out.put(b'-');
        }
        if flags.uppercase { b"IND" } else { b"ind" }
    } else if is_nan_bits(value) {
        if flags.uppercase { b"NAN" } else { b"nan" }
    } else if is_infinite_bits(value) {
        if sign_bit(value) {
            total += out.put(b'-');
        }
        if flags.uppercase { b"INF" } else { b"inf" }
    } else {
        return total;
    };
    total += out.put_slice(b"1.#");
    total += out.put_slice(letters);
    total
}

// ---------------------------------------------------------------------------
// Integer rendering
// ---------------------------------------------------------------------------

/// Render a 64-bit integer.
///
/// `min` is the field width (negative handling happens via the
/// left-justify flag upstream), `max` the minimum digit count (zero pad).
pub fn render_int(
    out: &mut OutBuf<'_>,
    value: i64,
    base: u32,
    min: i32,
    max: i32,
    flags: RenderFlags,
) -> usize {
    let mut total = 0;
    let max = max.max(0);

    let mut sign: u8 = 0;
    let uvalue = if flags.unsigned {
        value as u64
    } else if value < 0 {
        sign = b'-';
        value.unsigned_abs()
    } else {
        if flags.force_sign {
            sign = b'+';
        } else if flags.space_sign {
            sign = b' ';
        }
        value as u64
    };

    let table = if flags.uppercase {
        DIGITS_UPPER
    } else {
        DIGITS_LOWER
    };

    // Digits land least-significant first; grouping commas are inserted
    // during generation so they count toward the emitted width.
    let mut convert = [0u8; MAX_CONVERT];
    let mut place = 0;
    let mut remaining = uvalue;
    let mut digit_index = 0;
    loop {
        convert[place] = table[(remaining % u64::from(base)) as usize];
        place += 1;
        remaining /= u64::from(base);
        if flags.separators && base == 10 && remaining > 0 {
            digit_index += 1;
            if digit_index % 3 == 0 {
                convert[place] = b',';
                place += 1;
            }
        }
        if remaining == 0 || place >= MAX_CONVERT {
            break;
        }
    }
    if place == MAX_CONVERT {
        place -= 1;
    }

    let mut zpadlen = max - place as i32;
    let mut spadlen = min - max.max(place as i32) - i32::from(sign != 0);
    if zpadlen < 0 {
        zpadlen = 0;
    }
    if spadlen < 0 {
        spadlen = 0;
    }
    if flags.zero_pad {
        zpadlen = zpadlen.max(spadlen);
        spadlen = 0;
    }
    if flags.left_justify {
        spadlen = -spadlen;
    }

    while spadlen > 0 {
        total += out.put(b' ');
        spadlen -= 1;
    }
    if sign != 0 {
        total += out.put(sign);
    }
    while zpadlen > 0 {
        total += out.put(b'0');
        zpadlen -= 1;
    }
    while place > 0 {
        place -= 1;
        total += out.put(convert[place]);
    }
    while spadlen < 0 {
        total += out.put(b' ');
        spadlen += 1;
    }
    total
}

// ---------------------------------------------------------------------------
// Float rendering
// ---------------------------------------------------------------------------

fn pow10(mut exp: i32) -> f64 {
    let mut result = 1.0;
    while exp > 0 {
        result *= 10.0;
        exp -= 1;
    }
    result
}

/// Round half away from zero.
fn round64(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Round toward zero, keeping the sign.
fn round_zero(value: f64) -> f64 {
    value.trunc()
}

/// Render a float in fixed-point notation.
///
/// `max` is the fractional precision: default 6 when negative, capped at
/// 16 by the digit conversion method. When `trailing_zeros` is false,
/// trailing zero fraction digits are dropped (and with them the decimal
/// point, if nothing remains).
pub fn render_float(
    out: &mut OutBuf<'_>,
    value: f64,
    min: i32,
    max: i32,
    flags: RenderFlags,
    check_special: bool,
    trailing_zeros: bool,
) -> usize {
    if check_special && is_special(value) {
        return render_special(out, value, flags);
    }

    let mut total = 0;
    let max = if max < 0 { 6 } else { max.min(16) };

    let ufvalue = value.abs();
    let mut sign: u8 = 0;
    if value < 0.0 {
        sign = b'-';
    } else if flags.force_sign {
        sign = b'+';
    } else if flags.space_sign {
        sign = b' ';
    }

    let mut intpart = ufvalue as i64;

    // Fraction digits come from scaling into an integer; the synthetic
    // leading '1' keeps the fraction's leading zeros through conversion.
    let scale = pow10(max);
    let mut fracpart = round64(scale * (ufvalue - intpart as f64));
    if fracpart as f64 >= scale {
        intpart = intpart.saturating_add(1);
        fracpart -= scale as i64;
    }
    fracpart = fracpart.saturating_add(scale as i64);

    let mut iconvert = [0u8; MAX_CONVERT];
    let mut iplace = 0;
    let mut digit_index = 0;
    loop {
        iconvert[iplace] = DIGITS_LOWER[(intpart % 10) as usize];
        iplace += 1;
        intpart /= 10;
        if flags.separators && intpart > 0 {
            digit_index += 1;
            if digit_index % 3 == 0 {
                iconvert[iplace] = b',';
                iplace += 1;
            }
        }
        if intpart == 0 || iplace >= MAX_CONVERT {
            break;
        }
    }
    if iplace == MAX_CONVERT {
        iplace -= 1;
    }

    let mut fconvert = [0u8; MAX_CONVERT];
    let mut fplace = 0;
    let mut suppressing = !trailing_zeros;
    loop {
        let remainder = (fracpart % 10) as usize;
        if suppressing && remainder != 0 {
            suppressing = false;
        }
        if !suppressing || remainder != 0 {
            fconvert[fplace] = DIGITS_LOWER[remainder];
            fplace += 1;
        }
        fracpart /= 10;
        if fracpart == 0 || fplace >= MAX_CONVERT {
            break;
        }
    }
    if fplace == MAX_CONVERT {
        fplace -= 1;
    }
    if fplace > 0 {
        // Drop the synthetic leading '1'.
        fplace -= 1;
    }

    // One width unit for the decimal point, but only when a fractional
    // part is actually emitted.
    let mut padlen = min - iplace as i32 - max;
    if max > 0 && fplace > 0 {
        padlen -= 1;
    }
    if sign != 0 {
        padlen -= 1;
    }
    let mut zpadlen = if trailing_zeros { max - fplace as i32 } else { 0 };
    if zpadlen < 0 {
        zpadlen = 0;
    }
    if padlen < 0 {
        padlen = 0;
    }
    if flags.left_justify {
        padlen = -padlen;
    }

    if flags.zero_pad && padlen > 0 {
        if sign != 0 {
            total += out.put(sign);
            padlen -= 1;
            sign = 0;
        }
        while padlen > 0 {
            total += out.put(b'0');
            padlen -= 1;
        }
    }
    while padlen > 0 {
        total += out.put(b' ');
        padlen -= 1;
    }
    if sign != 0 {
        total += out.put(sign);
    }
    while iplace > 0 {
        iplace -= 1;
        total += out.put(iconvert[iplace]);
    }
    if max > 0 && fplace > 0 {
        total += out.put(b'.');
        while fplace > 0 {
            fplace -= 1;
            total += out.put(fconvert[fplace]);
        }
    }
    while zpadlen > 0 {
        total += out.put(b'0');
        zpadlen -= 1;
    }
    while padlen < 0 {
        total += out.put(b' ');
        padlen += 1;
    }
    total
}

/// Render a float in general notation.
///
/// Integral values render as plain integers, magnitudes outside
/// `[1e-5, 1e4)` switch to scientific notation, everything else is fixed
/// point with trailing zeros dropped.
pub fn render_float_general(
    out: &mut OutBuf<'_>,
    value: f64,
    min: i32,
    max: i32,
    flags: RenderFlags,
    check_special: bool,
) -> usize {
    let mut total = 0;
    if check_special && is_special(value) {
        total += render_special(out, value, flags);
    } else if value - (value as i64) as f64 == 0.0 {
        // Looks like an integer; max would zero-pad, so it is not used.
        total += render_int(out, value as i64, 10, min, 0, flags);
    } else if value.abs() < 0.00001 || value.abs() > 9999.9999 {
        total += render_scientific(out, value, max, flags, false);
    } else {
        total += render_float(out, value, min, max, flags, false, false);
    }
    total
}

/// Render a float in exponential notation.
///
/// Exact zero falls back to fixed-point rendering.
pub fn render_float_exp(
    out: &mut OutBuf<'_>,
    value: f64,
    min: i32,
    max: i32,
    flags: RenderFlags,
    check_special: bool,
) -> usize {
    let mut total = 0;
    if check_special && is_special(value) {
        total += render_special(out, value, flags);
    } else if value != 0.0 {
        total += render_scientific(out, value, max, flags, true);
    } else {
        total += render_float(out, value, min, max, flags, false, true);
    }
    total
}

/// Mantissa + exponent-letter + signed unpadded exponent.
///
/// The exponent is `log10(|value|)` rounded toward zero; mantissa and
/// exponent render with bare flags so field width and grouping do not
/// leak into the parts.
fn render_scientific(
    out: &mut OutBuf<'_>,
    value: f64,
    max: i32,
    flags: RenderFlags,
    trailing_zeros: bool,
) -> usize {
    let mut total = 0;
    let exponent = round_zero(value.abs().log10());
    let mantissa = value / 10f64.powf(exponent);
    total += render_float(
        out,
        mantissa,
        0,
        max,
        RenderFlags::default(),
        false,
        trailing_zeros,
    );
    total += out.put(if flags.uppercase { b'E' } else { b'e' });
    total += render_int(out, exponent as i64, 10, 0, -1, RenderFlags::default());
    total
}

// ---------------------------------------------------------------------------
// String rendering
// ---------------------------------------------------------------------------

/// Render a byte string with width/precision handling.
///
/// `None` renders the `<NULL>` placeholder. `max` (when non-negative)
/// truncates, `min` pads with spaces; an embedded NUL ends the string.
pub fn render_str(
    out: &mut OutBuf<'_>,
    value: Option<&[u8]>,
    flags: RenderFlags,
    min: i32,
    max: i32,
) -> usize {
    let mut total = 0;
    let value = value.unwrap_or(b"<NULL>");
    let value = match value.iter().position(|&b| b == 0) {
        Some(nul) => &value[..nul],
        None => value,
    };

    let mut strln = value.len() as i32;
    if max >= 0 && max < strln {
        strln = max;
    }
    let mut padlen = min - strln;
    if padlen < 0 {
        padlen = 0;
    }
    if flags.left_justify {
        padlen = -padlen;
    }

    while padlen > 0 {
        total += out.put(b' ');
        padlen -= 1;
    }
    for &b in &value[..strln as usize] {
        total += out.put(b);
    }
    while padlen < 0 {
        total += out.put(b' ');
        padlen += 1;
    }
    total
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
