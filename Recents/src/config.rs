//! Recents store configuration

use serde::{Deserialize, Serialize};

/// Maximum number of recent entries kept by default
pub const DEFAULT_CAPACITY: usize = 100;

/// Settings slot the recents list is persisted under by default
pub const DEFAULT_SLOT: &str = "recentDocumentBookmarks";

// Default value functions for serde
fn default_slot() -> String {
    DEFAULT_SLOT.to_string()
}
fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}
fn default_notify_buffer() -> usize {
    16
}

/// Tunables for a [`RecentsStore`](crate::RecentsStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentsConfig {
    /// Settings slot holding the serialized list
    #[serde(default = "default_slot")]
    pub slot: String,
    /// Upper bound on the number of entries; overflow evicts the oldest
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Buffered change notifications per subscriber before it lags
    #[serde(default = "default_notify_buffer")]
    pub notify_buffer: usize,
}

impl Default for RecentsConfig {
    fn default() -> Self {
        Self {
            slot: default_slot(),
            capacity: default_capacity(),
            notify_buffer: default_notify_buffer(),
        }
    }
}

impl RecentsConfig {
    /// Same defaults with a different capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: RecentsConfig = serde_json::from_str(r#"{"capacity": 5}"#).unwrap();
        assert_eq!(config.capacity, 5);
        assert_eq!(config.slot, DEFAULT_SLOT);
        assert_eq!(config.notify_buffer, 16);
    }
}
