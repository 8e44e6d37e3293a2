//! Access capabilities: opaque, renewable tokens for resource locations
//!
//! A capability is created when a location is first registered as opened.
//! It can later be resolved back to a location (which may fail once the
//! resource moved or access was revoked) and must be bracketed by
//! [`CapabilityProvider::begin_access`] / [`CapabilityProvider::end_access`]
//! whenever the location is touched. Platforms with OS-level grants plug in
//! their own provider; everything else uses [`PathCapabilities`].

use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Canonical string key for a location.
///
/// Relative paths are made absolute against the working directory, then
/// `.`/`..` components and trailing separators are removed lexically. The
/// filesystem is not consulted, so the key of a missing location is still
/// well defined.
#[must_use]
pub fn normalize_key(location: &Path) -> String {
    let absolute = std::path::absolute(location).unwrap_or_else(|_| location.to_path_buf());
    absolute.clean().to_string_lossy().into_owned()
}

/// An opaque token granting renewable access to one location.
///
/// Identity is the normalized `key`: two capabilities for the same location
/// are equal even if their token bytes differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessCapability {
    key: String,
    #[serde(with = "token_base64")]
    token: Vec<u8>,
}

impl AccessCapability {
    /// Build a capability from provider-specific token bytes and the key of
    /// the location it was created for.
    #[must_use]
    pub fn new(token: Vec<u8>, key: String) -> Self {
        Self { key, token }
    }

    /// Normalized location key captured at creation time.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw token bytes, only meaningful to the provider that made them.
    #[must_use]
    pub fn token(&self) -> &[u8] {
        &self.token
    }
}

impl PartialEq for AccessCapability {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for AccessCapability {}

impl Hash for AccessCapability {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

/// Platform seam for creating and using access capabilities.
pub trait CapabilityProvider: Send + Sync {
    /// Derive a renewable capability for `location`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapabilityCreation`] if the location is inaccessible.
    fn create(&self, location: &Path) -> Result<AccessCapability>;

    /// Resolve a capability back to its current location.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StaleCapability`] when the token no longer resolves.
    fn resolve(&self, capability: &AccessCapability) -> Result<PathBuf>;

    /// Request temporary access. Returns whether access was granted.
    fn begin_access(&self, capability: &AccessCapability) -> bool;

    /// Release access. Must be harmless without a preceding grant.
    fn end_access(&self, capability: &AccessCapability);
}

/// Pass-through provider for platforms without OS-level access grants.
///
/// The token is the normalized path itself, resolution succeeds while the
/// path exists, access is always granted and releasing it does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathCapabilities;

impl CapabilityProvider for PathCapabilities {
    fn create(&self, location: &Path) -> Result<AccessCapability> {
        let key = normalize_key(location);
        std::fs::metadata(&key).map_err(|source| Error::CapabilityCreation {
            path: location.to_path_buf(),
            source,
        })?;
        Ok(AccessCapability::new(key.clone().into_bytes(), key))
    }

    fn resolve(&self, capability: &AccessCapability) -> Result<PathBuf> {
        let stale = || Error::StaleCapability {
            key: capability.key().to_string(),
        };
        let path = std::str::from_utf8(capability.token())
            .map(PathBuf::from)
            .map_err(|_| stale())?;
        match path.try_exists() {
            Ok(true) => Ok(path),
            _ => Err(stale()),
        }
    }

    fn begin_access(&self, _capability: &AccessCapability) -> bool {
        true
    }

    fn end_access(&self, _capability: &AccessCapability) {}
}

/// Serde adapter storing token bytes as a base64 string.
mod token_base64 {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_key_removes_dot_segments() {
        let key = normalize_key(Path::new("/a/./b/../doc.txt"));
        assert_eq!(key, normalize_key(Path::new("/a/doc.txt")));
        assert_eq!(normalize_key(Path::new("/a/dir/")), normalize_key(Path::new("/a/dir")));
    }

    #[test]
    fn test_equality_ignores_token_bytes() {
        let a = AccessCapability::new(vec![1, 2, 3], "/a/doc.txt".to_string());
        let b = AccessCapability::new(vec![9], "/a/doc.txt".to_string());
        let c = AccessCapability::new(vec![1, 2, 3], "/a/other.txt".to_string());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_token_serializes_as_base64() {
        let cap = AccessCapability::new(b"hello".to_vec(), "/x".to_string());
        let json = serde_json::to_value(&cap).unwrap();
        assert_eq!(json["key"], "/x");
        assert_eq!(json["token"], "aGVsbG8=");

        let back: AccessCapability = serde_json::from_value(json).unwrap();
        assert_eq!(back.token(), b"hello");
    }

    #[test]
    fn test_path_capability_lifecycle() {
        let temp = TempDir::new().unwrap();
        let doc = temp.path().join("doc.txt");
        fs::write(&doc, "text").unwrap();

        let provider = PathCapabilities;
        let cap = provider.create(&doc).unwrap();
        assert_eq!(cap.key(), normalize_key(&doc));
        assert_eq!(provider.resolve(&cap).unwrap(), PathBuf::from(normalize_key(&doc)));
        assert!(provider.begin_access(&cap));
        provider.end_access(&cap);

        fs::remove_file(&doc).unwrap();
        assert!(matches!(
            provider.resolve(&cap),
            Err(Error::StaleCapability { .. })
        ));
    }

    #[test]
    fn test_path_capability_missing_location() {
        let temp = TempDir::new().unwrap();
        let result = PathCapabilities.create(&temp.path().join("missing.txt"));
        assert!(matches!(result, Err(Error::CapabilityCreation { .. })));
    }
}
