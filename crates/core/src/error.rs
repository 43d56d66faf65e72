//! Error types for Anteater IDE
//!
//! Centralized error handling using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Anteater IDE
#[derive(Error, Debug)]
pub enum AnteaterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("session file {0:?} is corrupted")]
    CorruptSession(PathBuf),

    #[error("path selection cancelled")]
    PathCancelled,

    #[error("no tab is active")]
    NoActiveTab,

    #[error("unknown tab: {0}")]
    UnknownTab(String),

    #[error("document has no backing file")]
    NoBackingFile,

    #[error("process error: {0}")]
    Process(String),
}

/// Result type alias for Anteater IDE operations
pub type Result<T> = std::result::Result<T, AnteaterError>;

impl AnteaterError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            AnteaterError::Io(e) => format!("File operation failed: {}", e),
            AnteaterError::CorruptSession(path) => {
                format!("Session file {} is corrupted", path.display())
            }
            AnteaterError::PathCancelled => "No path was selected".to_string(),
            AnteaterError::NoActiveTab => "No file is open".to_string(),
            AnteaterError::NoBackingFile => "This tab has not been saved to a file yet".to_string(),
            _ => self.to_string(),
        }
    }
}
