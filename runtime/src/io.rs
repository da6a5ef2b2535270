/*!
Console I/O - stdout output and stdin input builtins

Output errors (for example a closed pipe) are ignored: writing never ends
the program. Reads flush stdout first so prompts written with `Put` are
visible before the program blocks on input.
*/

use crate::conversions::{self, is_c_space, real_to_string};
use crate::scratch::c_bytes;
use std::ffi::c_char;
use std::io::{self, BufRead, Write};

/// Capacity of the caller buffer passed to `Get_Line`, terminator included
pub const MAX_INPUT_LENGTH: usize = 256;

/// Write `text`, followed by a newline when `newline` is set.
/// Absent text writes nothing at all.
pub fn put_text<W: Write>(out: &mut W, text: Option<&[u8]>, newline: bool) -> io::Result<()> {
    let Some(text) = text else {
        return Ok(());
    };
    out.write_all(text)?;
    if newline {
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Read one line into `dest` the way `fgets` does: at most `dest.len() - 1`
/// bytes, stopping after a newline. One trailing newline is stripped and the
/// result is NUL-terminated.
///
/// Returns the stored length, or `None` at end of input (in which case
/// `dest` is untouched). A line longer than the buffer is split; the rest is
/// left for the next read.
pub fn read_line_into<R: BufRead>(input: &mut R, dest: &mut [u8]) -> io::Result<Option<usize>> {
    let limit = dest.len().saturating_sub(1);
    let mut len = 0;

    while len < limit {
        let available = input.fill_buf()?;
        if available.is_empty() {
            break;
        }
        let chunk = &available[..available.len().min(limit - len)];
        let (take, found_newline) = match chunk.iter().position(|&b| b == b'\n') {
            Some(i) => (i + 1, true),
            None => (chunk.len(), false),
        };
        dest[len..len + take].copy_from_slice(&chunk[..take]);
        len += take;
        input.consume(take);
        if found_newline {
            break;
        }
    }

    if len == 0 {
        return Ok(None);
    }
    if dest[len - 1] == b'\n' {
        len -= 1;
    }
    dest[len] = 0;
    Ok(Some(len))
}

/// Skip whitespace (line breaks included) and return the rest of the line
/// that holds the next token, terminator included. `None` at end of input.
fn next_token_line<R: BufRead>(input: &mut R) -> io::Result<Option<Vec<u8>>> {
    loop {
        let available = input.fill_buf()?;
        if available.is_empty() {
            return Ok(None);
        }
        let skip = available.iter().take_while(|&&b| is_c_space(b)).count();
        let exhausted = skip == available.len();
        input.consume(skip);
        if !exhausted {
            break;
        }
    }

    let mut line = Vec::new();
    input.read_until(b'\n', &mut line)?;
    Ok(Some(line))
}

/// Read one integer token, then drop the rest of its line.
///
/// `None` on end of input or when the token is not a number; the line is
/// consumed either way.
pub fn read_integer<R: BufRead>(input: &mut R) -> io::Result<Option<i32>> {
    Ok(next_token_line(input)?.and_then(|line| conversions::scan_integer(&line)))
}

/// Read one real token, then drop the rest of its line.
pub fn read_real<R: BufRead>(input: &mut R) -> io::Result<Option<f64>> {
    Ok(next_token_line(input)?.and_then(|line| conversions::scan_real(&line)))
}

fn put_stdout(text: Option<&[u8]>, newline: bool) {
    let _ = put_text(&mut io::stdout().lock(), text, newline);
}

fn flush_stdout() {
    let _ = io::stdout().flush();
}

/// # Safety
/// `text` must be null or a valid NUL-terminated string.
#[unsafe(export_name = "Put_Line")]
pub unsafe extern "C" fn ada_put_line(text: *const c_char) {
    put_stdout(unsafe { c_bytes(text) }, true);
}

/// # Safety
/// `text` must be null or a valid NUL-terminated string.
#[unsafe(export_name = "Put")]
pub unsafe extern "C" fn ada_put(text: *const c_char) {
    put_stdout(unsafe { c_bytes(text) }, false);
}

#[unsafe(export_name = "Put_Integer")]
pub extern "C" fn ada_put_integer(value: i32) {
    put_stdout(Some(itoa::Buffer::new().format(value).as_bytes()), false);
}

#[unsafe(export_name = "Put_Real")]
pub extern "C" fn ada_put_real(value: f64) {
    put_stdout(Some(real_to_string(value).as_bytes()), false);
}

#[unsafe(export_name = "New_Line")]
pub extern "C" fn ada_new_line() {
    put_stdout(Some(b""), true);
}

/// Read a line from stdin into `buffer`.
///
/// # Safety
/// `buffer` must be null or point to at least `MAX_INPUT_LENGTH` writable
/// bytes.
#[unsafe(export_name = "Get_Line")]
pub unsafe extern "C" fn ada_get_line(buffer: *mut c_char) {
    if buffer.is_null() {
        return;
    }
    flush_stdout();
    let dest = unsafe { std::slice::from_raw_parts_mut(buffer.cast::<u8>(), MAX_INPUT_LENGTH) };
    let _ = read_line_into(&mut io::stdin().lock(), dest);
}

/// Read an integer from stdin into `*value`; unchanged on bad input.
///
/// # Safety
/// `value` must be null or valid for writes.
#[unsafe(export_name = "Get")]
pub unsafe extern "C" fn ada_get_integer(value: *mut i32) {
    if value.is_null() {
        return;
    }
    flush_stdout();
    if let Ok(Some(v)) = read_integer(&mut io::stdin().lock()) {
        unsafe { *value = v };
    }
}

/// Read a real from stdin into `*value`; unchanged on bad input.
///
/// # Safety
/// `value` must be null or valid for writes.
#[unsafe(export_name = "Get_Real")]
pub unsafe extern "C" fn ada_get_real(value: *mut f64) {
    if value.is_null() {
        return;
    }
    flush_stdout();
    if let Ok(Some(v)) = read_real(&mut io::stdin().lock()) {
        unsafe { *value = v };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    #[test]
    fn test_put_text() {
        let mut out = Vec::new();
        put_text(&mut out, Some(b"Hello"), false).unwrap();
        put_text(&mut out, Some(b", World!"), true).unwrap();
        put_text(&mut out, None, true).unwrap();
        assert_eq!(out, b"Hello, World!\n");
    }

    #[test]
    fn test_read_line_strips_newline() {
        let mut input = Cursor::new(&b"first line\nsecond\n"[..]);
        let mut buf = [0xffu8; MAX_INPUT_LENGTH];

        assert_eq!(read_line_into(&mut input, &mut buf).unwrap(), Some(10));
        assert_eq!(&buf[..11], b"first line\0");

        assert_eq!(read_line_into(&mut input, &mut buf).unwrap(), Some(6));
        assert_eq!(&buf[..7], b"second\0");

        assert_eq!(read_line_into(&mut input, &mut buf).unwrap(), None);
        assert_eq!(&buf[..7], b"second\0");
    }

    #[test]
    fn test_read_line_without_terminator() {
        let mut input = Cursor::new(&b"last"[..]);
        let mut buf = [0u8; MAX_INPUT_LENGTH];
        assert_eq!(read_line_into(&mut input, &mut buf).unwrap(), Some(4));
        assert_eq!(&buf[..5], b"last\0");
    }

    #[test]
    fn test_read_line_strips_only_one_newline() {
        let mut input = Cursor::new(&b"\n\nx\n"[..]);
        let mut buf = [0u8; 8];
        assert_eq!(read_line_into(&mut input, &mut buf).unwrap(), Some(0));
        assert_eq!(read_line_into(&mut input, &mut buf).unwrap(), Some(0));
        assert_eq!(read_line_into(&mut input, &mut buf).unwrap(), Some(1));
    }

    #[test]
    fn test_read_line_splits_long_lines() {
        let mut input = Cursor::new(&b"abcdefghij\n"[..]);
        let mut buf = [0u8; 5];
        assert_eq!(read_line_into(&mut input, &mut buf).unwrap(), Some(4));
        assert_eq!(&buf, b"abcd\0");
        assert_eq!(read_line_into(&mut input, &mut buf).unwrap(), Some(4));
        assert_eq!(&buf, b"efgh\0");
        assert_eq!(read_line_into(&mut input, &mut buf).unwrap(), Some(2));
        assert_eq!(&buf[..3], b"ij\0");
    }

    #[test]
    fn test_read_integer_drops_rest_of_line() {
        let mut input = Cursor::new(&b"42 and more\n7\n"[..]);
        assert_eq!(read_integer(&mut input).unwrap(), Some(42));
        assert_eq!(read_integer(&mut input).unwrap(), Some(7));
        assert_eq!(read_integer(&mut input).unwrap(), None);
    }

    #[test]
    fn test_read_integer_skips_blank_lines() {
        let mut input = Cursor::new(&b"\n\n   -15\nnext"[..]);
        assert_eq!(read_integer(&mut input).unwrap(), Some(-15));
        let mut rest = String::new();
        input.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "next");
    }

    #[test]
    fn test_read_integer_malformed_consumes_line() {
        let mut input = Cursor::new(&b"abc\n12\n"[..]);
        assert_eq!(read_integer(&mut input).unwrap(), None);
        assert_eq!(read_integer(&mut input).unwrap(), Some(12));
    }

    #[test]
    fn test_read_real() {
        let mut input = Cursor::new(&b"3.5e2 trailing\n-0.25\nx\n"[..]);
        assert_eq!(read_real(&mut input).unwrap(), Some(350.0));
        assert_eq!(read_real(&mut input).unwrap(), Some(-0.25));
        assert_eq!(read_real(&mut input).unwrap(), None);
        assert_eq!(read_real(&mut input).unwrap(), None);
    }

    #[test]
    fn test_null_arguments_are_ignored() {
        unsafe {
            ada_put_line(std::ptr::null());
            ada_put(std::ptr::null());
            ada_get_line(std::ptr::null_mut());
            ada_get_integer(std::ptr::null_mut());
            ada_get_real(std::ptr::null_mut());
        }
    }
}
