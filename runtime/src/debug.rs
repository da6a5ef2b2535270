/*!
Debug Output - tagged diagnostic lines on stderr
*/

use crate::conversions::real_to_string;
use crate::scratch::c_bytes;
use std::ffi::c_char;
use std::fmt::Display;
use std::io::{self, Write};

const TAG: &str = "[DEBUG]";

/// `[DEBUG] message` or `[DEBUG] message: value`
pub fn debug_line(message: &str, value: Option<&dyn Display>) -> String {
    match value {
        Some(value) => format!("{TAG} {message}: {value}"),
        None => format!("{TAG} {message}"),
    }
}

fn emit(line: String) {
    // Diagnostics are best effort; a closed stderr is not an error.
    let _ = writeln!(io::stderr().lock(), "{line}");
}

unsafe fn message<'a>(ptr: *const c_char) -> std::borrow::Cow<'a, str> {
    String::from_utf8_lossy(unsafe { c_bytes(ptr) }.unwrap_or_default())
}

/// # Safety
/// `msg` must be null or a valid NUL-terminated string.
#[unsafe(export_name = "Debug_Print")]
pub unsafe extern "C" fn ada_debug_print(msg: *const c_char) {
    let msg = unsafe { message(msg) };
    emit(debug_line(&msg, None));
}

/// # Safety
/// `msg` must be null or a valid NUL-terminated string.
#[unsafe(export_name = "Debug_Print_Int")]
pub unsafe extern "C" fn ada_debug_print_int(msg: *const c_char, value: i32) {
    let msg = unsafe { message(msg) };
    emit(debug_line(&msg, Some(&value)));
}

/// # Safety
/// `msg` must be null or a valid NUL-terminated string.
#[unsafe(export_name = "Debug_Print_Real")]
pub unsafe extern "C" fn ada_debug_print_real(msg: *const c_char, value: f64) {
    let msg = unsafe { message(msg) };
    emit(debug_line(&msg, Some(&real_to_string(value))));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_line() {
        assert_eq!(debug_line("starting", None), "[DEBUG] starting");
        assert_eq!(debug_line("count", Some(&3)), "[DEBUG] count: 3");
        assert_eq!(
            debug_line("ratio", Some(&real_to_string(0.5))),
            "[DEBUG] ratio: 0.5"
        );
    }

    #[test]
    fn test_debug_print_never_fails() {
        unsafe {
            ada_debug_print(c"hello".as_ptr());
            ada_debug_print(std::ptr::null());
            ada_debug_print_int(c"n".as_ptr(), -4);
            ada_debug_print_real(std::ptr::null(), f64::NAN);
        }
    }
}
