//! Unified error handling for boardmon
//!
//! This crate provides the single error type shared by the core library and the
//! command line front end. Missing hardware data is never an error in boardmon;
//! the variants below cover storage, argument and I/O failures only.

use std::io;
use std::path::PathBuf;

/// Result type alias using BoardmonError
pub type Result<T> = std::result::Result<T, BoardmonError>;

/// Unified error type for all boardmon operations
#[derive(thiserror::Error, Debug)]
pub enum BoardmonError {
    // ============================================================================
    // I/O and File System Errors
    // ============================================================================
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: io::Error,
    },

    // ============================================================================
    // Settings Errors
    // ============================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Contract Violations
    // ============================================================================
    #[error("Invalid argument {name}: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: String,
    },

    #[error("Hardware not found: {0}")]
    HardwareNotFound(String),
}

impl BoardmonError {
    /// Create a config error from a string
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Create a file write error
    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Create a file read error
    pub fn file_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }
}
