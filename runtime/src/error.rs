/*!
Fatal Errors - report-and-terminate builtins

Generated code calls one of the three report functions when it hits an
unrecoverable fault. There is no unwinding and no handler lookup: the
categorized message goes to stderr and the process exits with status 1.
Exit handlers registered with `atexit` (the runtime finalizer among them)
still run.
*/

use crate::scratch::c_bytes;
use std::ffi::c_char;
use std::io::{self, Write};
use thiserror::Error;

/// Exit status of a process terminated by a fatal report
pub const FATAL_EXIT_CODE: i32 = 1;

/// Category of an unrecoverable fault in generated code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalError {
    #[error("RUNTIME ERROR: {0}")]
    Runtime(String),

    /// Range, bounds or value constraint violated
    #[error("CONSTRAINT ERROR: {0}")]
    Constraint(String),

    /// Structural or control-flow violation
    #[error("PROGRAM ERROR: {0}")]
    Program(String),
}

impl FatalError {
    pub fn category(&self) -> &'static str {
        match self {
            FatalError::Runtime(_) => "RUNTIME ERROR",
            FatalError::Constraint(_) => "CONSTRAINT ERROR",
            FatalError::Program(_) => "PROGRAM ERROR",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            FatalError::Runtime(m) | FatalError::Constraint(m) | FatalError::Program(m) => m,
        }
    }

    /// Print the categorized line to stderr and terminate the process.
    pub fn report(&self) -> ! {
        let _ = writeln!(
            io::stderr().lock(),
            "{}: {}",
            self.category(),
            self.message()
        );
        std::process::exit(FATAL_EXIT_CODE)
    }
}

unsafe fn message_arg(ptr: *const c_char) -> String {
    String::from_utf8_lossy(unsafe { c_bytes(ptr) }.unwrap_or_default()).into_owned()
}

/// # Safety
/// `message` must be null or a valid NUL-terminated string.
#[unsafe(export_name = "__ada_runtime_error")]
pub unsafe extern "C" fn ada_runtime_error(message: *const c_char) -> ! {
    FatalError::Runtime(unsafe { message_arg(message) }).report()
}

/// # Safety
/// `message` must be null or a valid NUL-terminated string.
#[unsafe(export_name = "__ada_constraint_error")]
pub unsafe extern "C" fn ada_constraint_error(message: *const c_char) -> ! {
    FatalError::Constraint(unsafe { message_arg(message) }).report()
}

/// # Safety
/// `message` must be null or a valid NUL-terminated string.
#[unsafe(export_name = "__ada_program_error")]
pub unsafe extern "C" fn ada_program_error(message: *const c_char) -> ! {
    FatalError::Program(unsafe { message_arg(message) }).report()
}
