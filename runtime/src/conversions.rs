/*!
Type Conversion Operations

Parsing follows C `atoi`/`atof`: leading whitespace, optional sign, the
longest numeric prefix, trailing garbage ignored. Text without a numeric
prefix converts to zero. Reals also accept C99 hexadecimal notation
(`0x1.8p3`).
*/

use crate::scratch::{self, ScratchSlot, c_bytes};
use std::ffi::c_char;

/// C `isspace` in the "C" locale (includes vertical tab)
pub(crate) fn is_c_space(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b
}

fn skip_c_space(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().take_while(|&&b| is_c_space(b)).count();
    &bytes[start..]
}

/// Canonical decimal form
pub fn integer_to_string(value: i32) -> String {
    itoa::Buffer::new().format(value).to_owned()
}

/// Shortest text that reads back as the same `f64`.
///
/// Integral values drop the `.0` suffix (`3.0` prints as `3`), and
/// non-finite values print as `nan`, `inf` and `-inf`.
pub fn real_to_string(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let mut buf = ryu::Buffer::new();
    let text = buf.format_finite(value);
    text.strip_suffix(".0").unwrap_or(text).to_string()
}

/// Parse a leading integer. `None` when no digits follow the optional sign.
///
/// Values outside the `i32` range saturate.
pub fn scan_integer(bytes: &[u8]) -> Option<i32> {
    let bytes = skip_c_space(bytes);
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let count = digits.iter().take_while(|b| b.is_ascii_digit()).count();
    if count == 0 {
        return None;
    }

    // Stop accumulating once past the i32 range; the clamp below saturates.
    let ceiling = i64::from(i32::MAX) + 1;
    let magnitude = digits[..count]
        .iter()
        .fold(0i64, |acc, &d| (acc * 10 + i64::from(d - b'0')).min(ceiling));
    let value = if negative { -magnitude } else { magnitude };
    Some(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

/// Parse a leading real number. `None` when there is no numeric prefix.
pub fn scan_real(bytes: &[u8]) -> Option<f64> {
    let bytes = skip_c_space(bytes);
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if let Some(magnitude) = scan_hex_real(&bytes[sign..]) {
        return Some(if bytes[0] == b'-' { -magnitude } else { magnitude });
    }
    let len = real_prefix_len(bytes);
    if len == 0 {
        return None;
    }
    std::str::from_utf8(&bytes[..len]).ok()?.parse().ok()
}

/// Unsigned hexadecimal real (`0x` digits, optional `.` fraction, optional
/// binary exponent `p[+-]N`). `None` unless `body` starts with `0x`/`0X`.
///
/// `0x` without hex digits reads as the `0` in front of it.
fn scan_hex_real(body: &[u8]) -> Option<f64> {
    let rest = body
        .strip_prefix(b"0x")
        .or_else(|| body.strip_prefix(b"0X"))?;

    let mut mantissa: u64 = 0;
    let mut exponent: i64 = 0;
    let mut any_digit = false;
    let mut in_fraction = false;
    let mut pos = 0;
    while let Some(&b) = rest.get(pos) {
        if b == b'.' && !in_fraction {
            in_fraction = true;
            pos += 1;
            continue;
        }
        let Some(d) = char::from(b).to_digit(16) else {
            break;
        };
        any_digit = true;
        // Digits past 60 significant bits are dropped, keeping their weight.
        if mantissa >> 60 == 0 {
            mantissa = (mantissa << 4) | u64::from(d);
            if in_fraction {
                exponent -= 4;
            }
        } else if !in_fraction {
            exponent += 4;
        }
        pos += 1;
    }
    if !any_digit || mantissa == 0 {
        return Some(0.0);
    }

    if matches!(rest.get(pos), Some(b'p' | b'P')) {
        let tail = &rest[pos + 1..];
        let (negative, digits) = match tail.first() {
            Some(b'-') => (true, &tail[1..]),
            Some(b'+') => (false, &tail[1..]),
            _ => (false, tail),
        };
        let count = digits.iter().take_while(|b| b.is_ascii_digit()).count();
        if count > 0 {
            let magnitude = digits[..count]
                .iter()
                .fold(0i64, |acc, &d| (acc * 10 + i64::from(d - b'0')).min(1 << 20));
            exponent += if negative { -magnitude } else { magnitude };
        }
    }

    // Scale in steps that stay within the normal exponent range, so
    // subnormal results are not flushed to zero early.
    let mut value = mantissa as f64;
    let mut remaining = exponent.clamp(-2200, 2200);
    while remaining != 0 {
        let step = remaining.clamp(-1000, 1000);
        value *= 2f64.powi(step as i32);
        remaining -= step;
    }
    Some(value)
}

/// Length of the longest prefix of `bytes` that `strtod` would accept
/// (decimal notation plus `inf`, `infinity` and `nan`).
fn real_prefix_len(bytes: &[u8]) -> usize {
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let body = &bytes[sign..];

    for word in ["infinity", "inf", "nan"] {
        if body.len() >= word.len() && body[..word.len()].eq_ignore_ascii_case(word.as_bytes()) {
            return sign + word.len();
        }
    }

    let digits = |s: &[u8]| s.iter().take_while(|b| b.is_ascii_digit()).count();

    let int_digits = digits(body);
    let mut pos = int_digits;
    let mut frac_digits = 0;
    if body.get(pos) == Some(&b'.') {
        frac_digits = digits(&body[pos + 1..]);
        pos += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return 0;
    }

    if matches!(body.get(pos), Some(b'e' | b'E')) {
        let exp_sign = usize::from(matches!(body.get(pos + 1), Some(b'+' | b'-')));
        let exp_digits = digits(&body[(pos + 1 + exp_sign).min(body.len())..]);
        if exp_digits > 0 {
            pos += 1 + exp_sign + exp_digits;
        }
    }

    sign + pos
}

pub fn string_to_integer(text: Option<&[u8]>) -> i32 {
    text.and_then(scan_integer).unwrap_or(0)
}

pub fn string_to_real(text: Option<&[u8]>) -> f64 {
    text.and_then(scan_real).unwrap_or(0.0)
}

pub fn integer_to_real(value: i32) -> f64 {
    f64::from(value)
}

/// Truncates toward zero.
///
/// Out-of-range input is undefined at the language level; here it
/// saturates to `i32::MIN`/`i32::MAX` and NaN becomes 0.
pub fn real_to_integer(value: f64) -> i32 {
    value as i32
}

/// The result is overwritten by the next `Integer_To_String` call.
#[unsafe(export_name = "Integer_To_String")]
pub extern "C" fn ada_integer_to_string(value: i32) -> *mut c_char {
    scratch::store(ScratchSlot::Integer, integer_to_string(value).as_bytes())
}

/// The result is overwritten by the next `Real_To_String` call.
#[unsafe(export_name = "Real_To_String")]
pub extern "C" fn ada_real_to_string(value: f64) -> *mut c_char {
    scratch::store(ScratchSlot::Real, real_to_string(value).as_bytes())
}

/// # Safety
/// `text` must be null or a valid NUL-terminated string.
#[unsafe(export_name = "String_To_Integer")]
pub unsafe extern "C" fn ada_string_to_integer(text: *const c_char) -> i32 {
    string_to_integer(unsafe { c_bytes(text) })
}

/// # Safety
/// `text` must be null or a valid NUL-terminated string.
#[unsafe(export_name = "String_To_Real")]
pub unsafe extern "C" fn ada_string_to_real(text: *const c_char) -> f64 {
    string_to_real(unsafe { c_bytes(text) })
}

#[unsafe(export_name = "Integer_To_Real")]
pub extern "C" fn ada_integer_to_real(value: i32) -> f64 {
    integer_to_real(value)
}

#[unsafe(export_name = "Real_To_Integer")]
pub extern "C" fn ada_real_to_integer(value: f64) -> i32 {
    real_to_integer(value)
}
