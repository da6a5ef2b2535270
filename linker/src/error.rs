/**
Error types for the link driver
*/
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while preparing or linking a program
#[derive(Debug, Error)]
pub enum LinkError {
    /// Reading or writing a file failed
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The IR module defines no candidate entry procedure
    #[error("No main procedure found in {}", path.display())]
    NoEntryProcedure { path: PathBuf },

    /// A path that would be passed to an external tool was rejected
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// Entry names become linker arguments, so they must be plain identifiers
    #[error("Invalid entry procedure name '{0}'")]
    InvalidEntryName(String),

    /// An external tool could not be started or exited unsuccessfully
    #[error("{tool} failed: {message}")]
    ToolFailed { tool: String, message: String },
}

/// Result type for link driver operations
pub type LinkResult<T> = Result<T, LinkError>;
