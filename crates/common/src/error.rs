//! Error types shared across FrameGrab crates.

use std::time::Duration;

/// Top-level error type for FrameGrab operations.
#[derive(Debug, thiserror::Error)]
pub enum FramegrabError {
    /// The operating system could not report display geometry
    /// (for example a headless session with no display attached).
    #[error("Display query failed: {message}")]
    DisplayQuery { message: String },

    /// The native capture call failed or returned no pixel data
    /// (permission denied, display disconnected, compositor unavailable).
    #[error("Capture unavailable: {message}")]
    CaptureUnavailable { message: String },

    /// An intermediate native handle (device context, image provider,
    /// display connection) could not be obtained.
    #[error("Resource acquisition failed: {message}")]
    ResourceAcquisition { message: String },

    /// A native buffer did not match its declared geometry.
    #[error("Invalid frame data: {message}")]
    InvalidFrame { message: String },

    /// A capture did not complete within the caller's deadline.
    #[error("Capture timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using FramegrabError.
pub type FramegrabResult<T> = Result<T, FramegrabError>;

impl FramegrabError {
    pub fn display_query(msg: impl Into<String>) -> Self {
        Self::DisplayQuery {
            message: msg.into(),
        }
    }

    pub fn capture_unavailable(msg: impl Into<String>) -> Self {
        Self::CaptureUnavailable {
            message: msg.into(),
        }
    }

    pub fn resource_acquisition(msg: impl Into<String>) -> Self {
        Self::ResourceAcquisition {
            message: msg.into(),
        }
    }

    pub fn invalid_frame(msg: impl Into<String>) -> Self {
        Self::InvalidFrame {
            message: msg.into(),
        }
    }

    pub fn timeout(timeout: Duration) -> Self {
        Self::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
