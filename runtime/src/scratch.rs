/*!
Scratch Buffers - fixed-capacity result storage for string-producing builtins

Generated code receives `char*` results and never frees them, so every
string-producing builtin copies its (owned) result into a scratch slot and
hands out a pointer into that slot.

Contract for callers at the C boundary: a returned pointer stays valid only
until the next call that writes the same slot. Each producing operation owns
one slot, so `Concat(Integer_To_String(x), Real_To_String(y))` works, while
two `Concat` results can never be held at the same time.

Slots are thread-local: every calling thread gets its own set.
*/

use std::cell::RefCell;
use std::ffi::{CStr, c_char};

/// Capacity of the string scratch buffers, terminator included.
pub const MAX_STRING_LENGTH: usize = 1024;

/// Capacity of the numeric-to-string scratch buffers, terminator included.
pub const NUMERIC_BUFFER_LENGTH: usize = 64;

const SLOT_COUNT: usize = 6;

/// One scratch slot per string-producing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScratchSlot {
    Substring = 0,
    Concat = 1,
    Upper = 2,
    Lower = 3,
    Integer = 4,
    Real = 5,
}

impl ScratchSlot {
    /// Usable bytes plus the terminator
    pub const fn capacity(self) -> usize {
        match self {
            ScratchSlot::Integer | ScratchSlot::Real => NUMERIC_BUFFER_LENGTH,
            _ => MAX_STRING_LENGTH,
        }
    }
}

thread_local! {
    static SLOTS: RefCell<[[u8; MAX_STRING_LENGTH]; SLOT_COUNT]> =
        const { RefCell::new([[0; MAX_STRING_LENGTH]; SLOT_COUNT]) };
}

/// Copy `bytes` into `slot`, truncated to the slot capacity minus one,
/// NUL-terminate it, and return a pointer to the slot.
///
/// The previous content of the slot is overwritten.
pub fn store(slot: ScratchSlot, bytes: &[u8]) -> *mut c_char {
    let len = bytes.len().min(slot.capacity() - 1);
    SLOTS.with_borrow_mut(|slots| {
        let buf = &mut slots[slot as usize];
        buf[..len].copy_from_slice(&bytes[..len]);
        buf[len] = 0;
        buf.as_mut_ptr().cast()
    })
}

/// View a C string argument as bytes. Null maps to `None`.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
pub unsafe fn c_bytes<'a>(ptr: *const c_char) -> Option<&'a [u8]> {
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(ptr) }.to_bytes())
    }
}
