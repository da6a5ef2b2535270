/*!
Entry Shim and Finalization

The compiled program exposes one parameterless procedure. With the
`entry-shim` feature this crate provides the C `main` symbol, which links
against that procedure under the name `Main`. A different name is supplied
at link time as a symbol alias (see the `adalink` driver); a missing
procedure is a link error, never a runtime one.

`run` is the shim itself and can be driven with any function pointer.
*/

use std::ffi::c_int;
use std::io::{self, Write};
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

/// Exit status after the entry procedure returns normally
pub const SUCCESS_EXIT_CODE: c_int = 0;

/// Signature of the generated entry procedure
pub type EntryProcedure = unsafe extern "C" fn();

static FINALIZER_REGISTERED: Once = Once::new();
static FINALIZED: AtomicBool = AtomicBool::new(false);

/// Register the exit-time finalizer with the C library's exit handlers.
/// Later calls do nothing.
pub fn register_finalizer() {
    FINALIZER_REGISTERED.call_once(|| {
        // A failed registration only loses the final flush.
        let _ = unsafe { libc::atexit(finalize_at_exit) };
    });
}

extern "C" fn finalize_at_exit() {
    finalize();
}

/// Exit-time teardown. Runs its body at most once per process and never
/// fails.
pub fn finalize() {
    if FINALIZED.swap(true, Ordering::SeqCst) {
        return;
    }
    flush_streams();
}

/// Flush the standard streams, ignoring errors. Safe to repeat.
fn flush_streams() {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
}

/// Hook callable by generated code at any time.
///
/// Only flushes: output written after this call is still flushed by the
/// exit-time finalizer, which this does not consume.
#[unsafe(no_mangle)]
pub extern "C" fn ada_runtime_finalize() {
    flush_streams();
}

/// Invoke `entry` once and return the process exit code.
///
/// The finalizer is registered before the program starts, so it runs on
/// every exit path, fatal reports included.
///
/// # Safety
/// `entry` must be safe to call with no arguments.
pub unsafe fn run(entry: EntryProcedure) -> c_int {
    register_finalizer();
    unsafe { entry() };
    SUCCESS_EXIT_CODE
}

#[cfg(feature = "entry-shim")]
mod shim {
    use std::ffi::{c_char, c_int};

    unsafe extern "C" {
        #[link_name = "Main"]
        fn program_main();
    }

    /// Process entry point. Command-line arguments are accepted but not
    /// forwarded to the program.
    ///
    /// # Safety
    /// Called by the C runtime startup code only.
    #[unsafe(no_mangle)]
    pub unsafe extern "C" fn main(_argc: c_int, _argv: *const *const c_char) -> c_int {
        unsafe { super::run(program_main) }
    }
}
