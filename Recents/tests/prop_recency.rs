//! Property tests for recency ordering and capacity bounds

use std::path::{Path, PathBuf};
use std::sync::Arc;

use proptest::prelude::*;
use recents::{
    AccessCapability, CapabilityProvider, MemorySettings, RecentsConfig, RecentsStore, Result,
    normalize_key,
};

/// Accepts every location; resolution is the identity
struct Passthrough;

impl CapabilityProvider for Passthrough {
    fn create(&self, location: &Path) -> Result<AccessCapability> {
        let key = normalize_key(location);
        Ok(AccessCapability::new(key.clone().into_bytes(), key))
    }

    fn resolve(&self, capability: &AccessCapability) -> Result<PathBuf> {
        Ok(PathBuf::from(capability.key()))
    }

    fn begin_access(&self, _capability: &AccessCapability) -> bool {
        true
    }

    fn end_access(&self, _capability: &AccessCapability) {}
}

/// Reference model: move-to-front then truncate
fn model(opens: &[u8], capacity: usize) -> Vec<PathBuf> {
    let mut list: Vec<PathBuf> = Vec::new();
    for id in opens {
        let path = PathBuf::from(format!("/docs/{id}"));
        list.retain(|p| p != &path);
        list.insert(0, path);
        list.truncate(capacity);
    }
    list
}

proptest! {
    #[test]
    fn prop_list_matches_move_to_front_model(
        opens in proptest::collection::vec(0u8..20, 0..60),
        capacity in 1usize..12,
    ) {
        let store = RecentsStore::with_config(
            Arc::new(MemorySettings::new()),
            Arc::new(Passthrough),
            RecentsConfig::with_capacity(capacity),
        );
        for id in &opens {
            store.record_opened(Path::new(&format!("/docs/{id}")));
        }

        let listed = store.list();
        prop_assert!(listed.len() <= capacity);
        prop_assert_eq!(listed, model(&opens, capacity));
    }

    #[test]
    fn prop_removed_never_listed(
        opens in proptest::collection::vec(0u8..10, 1..30),
        victim in 0u8..10,
    ) {
        let store = RecentsStore::new(Arc::new(MemorySettings::new()), Arc::new(Passthrough));
        for id in &opens {
            store.record_opened(Path::new(&format!("/docs/{id}")));
        }
        let victim = PathBuf::from(format!("/docs/{victim}"));
        let was_present = store.list().contains(&victim);

        prop_assert_eq!(store.remove([&victim]), was_present);
        prop_assert!(!store.list().contains(&victim));
    }
}
