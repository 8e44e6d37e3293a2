//! Error types for `recents`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `recents` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== Capability Errors ====================
    /// A capability could not be created for the location (missing, unreadable).
    #[error("cannot create access capability for {path}: {source}")]
    CapabilityCreation {
        /// The location that was being registered.
        path: PathBuf,
        /// The underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// The capability no longer resolves to a location (moved, deleted, revoked).
    #[error("stale access capability: {key}")]
    StaleCapability {
        /// The normalized key the capability was created for.
        key: String,
    },

    /// Access to a capability-protected location was not granted.
    #[error("access denied: {key}")]
    AccessDenied {
        /// The normalized key of the capability.
        key: String,
    },

    /// A capability token could not be decoded.
    #[error("invalid capability token: {0}")]
    Token(String),

    // ==================== Persistence Errors ====================
    /// Reading or writing a settings slot failed.
    #[error("persistence error in slot '{slot}': {source}")]
    Persistence {
        /// The settings slot that was being read or written.
        slot: String,
        /// What went wrong underneath.
        #[source]
        source: Box<Error>,
    },

    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an error that happened while touching a settings slot.
    pub(crate) fn persistence(slot: &str, source: Error) -> Self {
        Self::Persistence {
            slot: slot.to_string(),
            source: Box::new(source),
        }
    }
}

/// Result type alias for `recents` operations.
pub type Result<T> = std::result::Result<T, Error>;
