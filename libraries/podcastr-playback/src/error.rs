//! Error types for media synchronization
//!
//! Store commands never fail. These errors only come back from the media
//! primitive, and the controller logs them instead of propagating.

use thiserror::Error;

/// Media primitive errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The platform player rejected a command
    #[error("Media error: {0}")]
    Media(String),

    /// A command needs a loaded source
    #[error("No media source loaded")]
    NoSource,

    /// Seek target the platform player cannot honour
    #[error("Invalid seek position: {0}s")]
    InvalidSeek(f64),
}

/// Result type for media operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
