/*!
String Operations - byte-string manipulation for generated code

The safe functions return owned results. The exported C symbols copy those
results into their scratch slot (see `scratch`), so a returned pointer is
overwritten by the next call of the same builtin.

Strings are plain byte strings: lengths count bytes and case mapping is
ASCII-only, independent of any locale.
*/

use crate::scratch::{self, MAX_STRING_LENGTH, ScratchSlot, c_bytes};
use std::ffi::c_char;

/// Longest string a builtin can produce, excluding the terminator
const MAX_RESULT: usize = MAX_STRING_LENGTH - 1;

/// Byte length of `text`; absent text has length 0.
pub fn length(text: Option<&[u8]>) -> i32 {
    text.map_or(0, |t| i32::try_from(t.len()).unwrap_or(i32::MAX))
}

/// Zero-based substring of at most `length` bytes starting at `start`.
///
/// Negative arguments and a start at or past the end give an empty result.
/// A length running past the end is clamped to the remaining text, and the
/// result never exceeds the scratch capacity.
pub fn substring(text: Option<&[u8]>, start: i32, length: i32) -> Vec<u8> {
    let Some(text) = text else {
        return Vec::new();
    };
    let (Ok(start), Ok(length)) = (usize::try_from(start), usize::try_from(length)) else {
        return Vec::new();
    };
    if start >= text.len() {
        return Vec::new();
    }

    let take = length.min(text.len() - start).min(MAX_RESULT);
    text[start..start + take].to_vec()
}

/// `a` followed by `b`, truncated to the scratch capacity.
pub fn concat(a: Option<&[u8]>, b: Option<&[u8]>) -> Vec<u8> {
    let mut out = Vec::with_capacity(length(a) as usize + length(b) as usize);
    for part in [a, b].into_iter().flatten() {
        let room = MAX_RESULT - out.len();
        out.extend_from_slice(&part[..part.len().min(room)]);
    }
    out
}

pub fn to_upper(text: Option<&[u8]>) -> Vec<u8> {
    map_bytes(text, u8::to_ascii_uppercase)
}

pub fn to_lower(text: Option<&[u8]>) -> Vec<u8> {
    map_bytes(text, u8::to_ascii_lowercase)
}

fn map_bytes(text: Option<&[u8]>, f: fn(&u8) -> u8) -> Vec<u8> {
    let text = text.unwrap_or_default();
    text[..text.len().min(MAX_RESULT)].iter().map(f).collect()
}

/// `Length(str) -> Integer`
///
/// # Safety
/// `text` must be null or a valid NUL-terminated string.
#[unsafe(export_name = "Length")]
pub unsafe extern "C" fn ada_length(text: *const c_char) -> i32 {
    length(unsafe { c_bytes(text) })
}

/// `Substring(str, start, length) -> String`
///
/// # Safety
/// `text` must be null or a valid NUL-terminated string.
/// The result is overwritten by the next `Substring` call.
#[unsafe(export_name = "Substring")]
pub unsafe extern "C" fn ada_substring(text: *const c_char, start: i32, length: i32) -> *mut c_char {
    let result = substring(unsafe { c_bytes(text) }, start, length);
    scratch::store(ScratchSlot::Substring, &result)
}

/// `Concat(a, b) -> String`
///
/// # Safety
/// Both arguments must be null or valid NUL-terminated strings.
/// The result is overwritten by the next `Concat` call.
#[unsafe(export_name = "Concat")]
pub unsafe extern "C" fn ada_concat(a: *const c_char, b: *const c_char) -> *mut c_char {
    let result = unsafe { concat(c_bytes(a), c_bytes(b)) };
    scratch::store(ScratchSlot::Concat, &result)
}

/// # Safety
/// `text` must be null or a valid NUL-terminated string.
/// The result is overwritten by the next `To_Upper` call.
#[unsafe(export_name = "To_Upper")]
pub unsafe extern "C" fn ada_to_upper(text: *const c_char) -> *mut c_char {
    let result = to_upper(unsafe { c_bytes(text) });
    scratch::store(ScratchSlot::Upper, &result)
}

/// # Safety
/// `text` must be null or a valid NUL-terminated string.
/// The result is overwritten by the next `To_Lower` call.
#[unsafe(export_name = "To_Lower")]
pub unsafe extern "C" fn ada_to_lower(text: *const c_char) -> *mut c_char {
    let result = to_lower(unsafe { c_bytes(text) });
    scratch::store(ScratchSlot::Lower, &result)
}
