use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or persisting a translation document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The expected language file does not exist.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFailure {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file content is not valid JSON.
    #[error("Malformed document {}: {source}", .path.display())]
    MalformedDocument {
        /// Path of the malformed file
        path: PathBuf,
        /// Parse error with line and column
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON whose top-level value is not an object.
    #[error("Malformed document {}: top-level value must be a JSON object", .path.display())]
    NotAnObject {
        /// Path of the offending file
        path: PathBuf,
    },

    /// The result could not be persisted.
    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailure {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl DocumentError {
    /// Path of the file this error is about.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::FileNotFound { path }
            | Self::ReadFailure { path, .. }
            | Self::MalformedDocument { path, .. }
            | Self::NotAnObject { path }
            | Self::WriteFailure { path, .. } => path,
        }
    }
}
