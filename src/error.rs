//! Unified error hierarchy for SoloRun
//!
//! The core itself is almost total: classification and routine generation
//! cannot fail, so the error surface is tracking validation plus the usual
//! boundary concerns (files, configuration).

use thiserror::Error;

use crate::tracker::TrackError;

/// Top-level error type for SoloRun operations
#[derive(Debug, Error)]
pub enum SoloRunError {
    /// Fix validation errors from the position tracker
    #[error("Tracking error: {0}")]
    Track(#[from] TrackError),

    /// Track import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for SoloRun operations
pub type Result<T> = std::result::Result<T, SoloRunError>;

impl SoloRunError {
    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            SoloRunError::Track(TrackError::NonMonotonicTimestamp { .. }) => {
                "A position fix arrived out of order and was rejected.".to_string()
            }
            SoloRunError::Track(_) => {
                "A position fix carried coordinates outside the valid range.".to_string()
            }
            SoloRunError::Import(reason) => {
                format!("Could not read the recorded track: {}", reason)
            }
            SoloRunError::Configuration(reason) => {
                format!("Configuration problem: {}", reason)
            }
            SoloRunError::Io(e) => format!("File access failed: {}", e),
        }
    }
}
