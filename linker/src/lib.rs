/// adalink - links compiled Ada-subset programs with their runtime
///
/// This crate implements the link step, including:
/// - Entry procedure discovery in emitted LLVM IR
/// - Runtime archive builds with the entry shim enabled
/// - clang invocation with the entry symbol alias
pub mod entry;
pub mod error;
pub mod link;

pub use entry::{entry_procedure_in_file, find_entry_procedure};
pub use error::{LinkError, LinkResult};
pub use link::{LinkOptions, link_program};
