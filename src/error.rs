// src/error.rs

//! Error types for apt-container workflows

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while preparing or running an apt-get workflow
#[derive(Error, Debug)]
pub enum Error {
    /// Conflicting or otherwise unusable options
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// Nothing to install after merging arguments and the requirements file
    #[error("invalid options: received no packages/requirements")]
    NoInput,

    /// Requirements file could not be opened or read
    #[error("could not read requirements file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed `--extra-options` string
    #[error("failed parsing extra options: {0}")]
    OptionParse(String),

    /// The package-manager binary is not available
    #[error("apt-get command not found: {program}")]
    PackageManagerNotFound { program: String },

    /// apt-get ran and exited unsuccessfully
    #[error("failed running apt-get {action}: exit status {code}")]
    CommandFailed { action: String, code: i32 },

    /// apt-get was interrupted before it finished
    #[error("failed running apt-get {action}: subprocess was canceled")]
    Canceled { action: String },

    /// Package index lists could not be removed
    #[error("failed removing lists ({}): {source}", path.display())]
    ListsCleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit code to report for this error
    ///
    /// Mirrors apt-get's own exit code when the failure came from it, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed { code, .. } => *code,
            _ => 1,
        }
    }

    /// Whether this error stems from option validation (help should be shown)
    pub fn is_invalid_options(&self) -> bool {
        matches!(self, Self::InvalidOptions(_) | Self::NoInput)
    }
}
