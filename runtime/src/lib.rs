/*!
Ada Runtime - builtin routines for compiled Ada-subset programs

Generated LLVM IR calls these `extern "C"` functions by their Ada-facing
names (`Put_Line`, `Substring`, `Random_Integer`, ...). Build the
`staticlib` with the `entry-shim` feature to also get the C `main` that
starts the program.

Edition 2024 compliant with proper unsafe annotations.
*/

pub mod conversions;
pub mod debug;
pub mod entry;
pub mod error;
pub mod io;
pub mod math;
pub mod random;
pub mod scratch;
pub mod strings;

// Re-export main types
pub use entry::{EntryProcedure, finalize, run};
pub use error::{FATAL_EXIT_CODE, FatalError};
pub use io::MAX_INPUT_LENGTH;
pub use random::{Prng, RAND_MAX};
pub use scratch::{MAX_STRING_LENGTH, NUMERIC_BUFFER_LENGTH, ScratchSlot};
