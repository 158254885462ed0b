//! Global error handling for catsel
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::clipboard::ClipboardError;

/// Global error type for catsel operations
#[derive(Error, Debug)]
pub enum CatselError {
    /// Target exists but is not a directory
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Target could not be stat'ed or listed
    #[error("Not accessible: {}: {source}", .path.display())]
    NotAccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Navigation target resolves above the workspace root
    #[error("Outside of workspace: {}", .0.display())]
    OutsideWorkspace(PathBuf),

    /// File content could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Nothing left to export once exclusions are applied
    #[error("No files to export")]
    ExportEmpty,

    /// Clipboard errors
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(#[from] ClipboardError),

    /// External application could not be launched
    #[error("Failed to open {}: {reason}", .path.display())]
    OpenFailed { path: PathBuf, reason: String },

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Specialized Result type for catsel operations
pub type Result<T> = std::result::Result<T, CatselError>;

/// Creates a CatselError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::CatselError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

impl CatselError {
    /// Wrap an io error raised while stat'ing or listing `path`
    pub fn not_accessible(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::NotAccessible {
            path: path.into(),
            source,
        }
    }

    /// True for the errors a navigation or selection command swallows
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            Self::NotADirectory(_) | Self::NotAccessible { .. } | Self::OutsideWorkspace(_)
        )
    }
}

// Allow converting CatselError to io::Error so main can return io::Result
impl From<CatselError> for io::Error {
    fn from(err: CatselError) -> Self {
        match err {
            CatselError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}
