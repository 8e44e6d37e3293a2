//! The recents store: an ordered, deduplicated, capacity-bounded list of
//! previously opened locations.
//!
//! Entries are kept most-recent first. The list lives in one settings slot
//! and every mutation reloads it, applies the change, and writes the whole
//! list back while holding the store's write lock, so two completions that
//! race never lose each other's update. Readers work on a cached snapshot
//! behind the read side of the same lock.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::capability::{AccessCapability, CapabilityProvider, normalize_key};
use crate::config::RecentsConfig;
use crate::error::{Error, Result};
use crate::settings::SettingsStore;

/// One persisted recent item. Serializes as `{ "key": ..., "token": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentEntry {
    capability: AccessCapability,
}

impl RecentEntry {
    #[must_use]
    pub fn new(capability: AccessCapability) -> Self {
        Self { capability }
    }

    /// Normalized location key, unique within a store
    #[must_use]
    pub fn key(&self) -> &str {
        self.capability.key()
    }

    #[must_use]
    pub fn capability(&self) -> &AccessCapability {
        &self.capability
    }
}

/// Persisted recent-documents list with change notifications.
pub struct RecentsStore {
    settings: Arc<dyn SettingsStore>,
    capabilities: Arc<dyn CapabilityProvider>,
    config: RecentsConfig,
    /// `None` until the slot is first read
    entries: RwLock<Option<Vec<RecentEntry>>>,
    changes: broadcast::Sender<()>,
}

impl fmt::Debug for RecentsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecentsStore")
            .field("config", &self.config)
            .field("loaded", &self.entries.read().is_some())
            .finish_non_exhaustive()
    }
}

impl RecentsStore {
    /// Store with the default slot and capacity
    #[must_use]
    pub fn new(settings: Arc<dyn SettingsStore>, capabilities: Arc<dyn CapabilityProvider>) -> Self {
        Self::with_config(settings, capabilities, RecentsConfig::default())
    }

    #[must_use]
    pub fn with_config(
        settings: Arc<dyn SettingsStore>,
        capabilities: Arc<dyn CapabilityProvider>,
        config: RecentsConfig,
    ) -> Self {
        let (changes, _) = broadcast::channel(config.notify_buffer.max(1));
        Self {
            settings,
            capabilities,
            config,
            entries: RwLock::new(None),
            changes,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RecentsConfig {
        &self.config
    }

    /// The provider used to create and resolve entry capabilities
    #[must_use]
    pub fn capabilities(&self) -> &Arc<dyn CapabilityProvider> {
        &self.capabilities
    }

    /// Subscribe to change notifications.
    ///
    /// A unit message is sent after every mutation that reached storage;
    /// call [`list`](Self::list) to see the new state.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.changes.subscribe()
    }

    /// Raw persisted entries, most recent first, including stale ones
    #[must_use]
    pub fn entries(&self) -> Vec<RecentEntry> {
        self.snapshot()
    }

    /// Number of persisted entries, including stale ones
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve every entry to its current location.
    ///
    /// Entries whose capability no longer resolves are skipped (they stay
    /// persisted until removed or evicted). Locations that resolve to the
    /// same normalized path are reported once, at the most recent position.
    #[must_use]
    pub fn list(&self) -> Vec<PathBuf> {
        let mut resolved: IndexMap<String, PathBuf> = IndexMap::new();
        for entry in self.snapshot() {
            match self.capabilities.resolve(entry.capability()) {
                Ok(path) => {
                    resolved.entry(normalize_key(&path)).or_insert(path);
                }
                Err(e) => tracing::debug!("Skipping recent entry {}: {}", entry.key(), e),
            }
        }
        resolved.into_values().collect()
    }

    /// Capability of the stored entry for `location`, matched by key or by
    /// resolved location. Reusing it keeps a previously granted access
    /// alive where creating a new one might not be allowed.
    ///
    /// Entries whose capability no longer resolves are skipped, so a stale
    /// record never stands in for a fresh capability.
    #[must_use]
    pub fn find(&self, location: &Path) -> Option<AccessCapability> {
        let keys = HashSet::from([normalize_key(location)]);
        self.snapshot()
            .into_iter()
            .filter(|entry| self.matches_any(entry, &keys))
            .find(|entry| self.capabilities.resolve(entry.capability()).is_ok())
            .map(|entry| entry.capability)
    }

    /// Register `location` as just opened, moving it to the front.
    ///
    /// Best effort: if no capability can be created, or the list cannot be
    /// persisted, the failure is logged and nothing changes. Returns whether
    /// the list was updated.
    pub fn record_opened(&self, location: &Path) -> bool {
        let capability = match self.capabilities.create(location) {
            Ok(capability) => capability,
            Err(e) => {
                tracing::warn!("Not tracking {} as recent: {}", location.display(), e);
                return false;
            }
        };
        let entry = RecentEntry::new(capability);

        self.mutate("record", move |entries| {
            entries.retain(|existing| existing.key() != entry.key());
            entries.insert(0, entry);
            true
        })
    }

    /// Remove every entry whose key, or resolved location, matches one of
    /// `locations`. Returns whether anything was removed; nothing is written
    /// and no notification is sent otherwise.
    pub fn remove<I, P>(&self, locations: I) -> bool
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let keys: HashSet<String> = locations
            .into_iter()
            .map(|location| normalize_key(location.as_ref()))
            .collect();
        if keys.is_empty() {
            return false;
        }

        self.mutate("remove", |entries| {
            let before = entries.len();
            entries.retain(|entry| !self.matches_any(entry, &keys));
            entries.len() != before
        })
    }

    /// Remove all entries
    pub fn clear(&self) -> bool {
        self.mutate("clear", |entries| {
            entries.clear();
            true
        })
    }

    /// Forget the cached snapshot so the next read goes back to storage.
    pub fn reload(&self) {
        *self.entries.write() = None;
    }

    fn matches_any(&self, entry: &RecentEntry, keys: &HashSet<String>) -> bool {
        if keys.contains(entry.key()) {
            return true;
        }
        self.capabilities
            .resolve(entry.capability())
            .is_ok_and(|path| keys.contains(&normalize_key(&path)))
    }

    fn snapshot(&self) -> Vec<RecentEntry> {
        if let Some(entries) = self.entries.read().as_ref() {
            return entries.clone();
        }
        let mut cache = self.entries.write();
        cache
            .get_or_insert_with(|| {
                self.load().unwrap_or_else(|e| {
                    tracing::warn!("Failed to load recents, starting empty: {}", e);
                    Vec::new()
                })
            })
            .clone()
    }

    /// Single-writer read-modify-write of the persisted list.
    fn mutate<F>(&self, op: &str, apply: F) -> bool
    where
        F: FnOnce(&mut Vec<RecentEntry>) -> bool,
    {
        let mut cache = self.entries.write();
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to reload recents before {}: {}", op, e);
                cache.clone().unwrap_or_default()
            }
        };

        if !apply(&mut entries) {
            return false;
        }
        entries.truncate(self.config.capacity);

        if let Err(e) = self.persist(&entries) {
            tracing::warn!("Recents {} not saved: {}", op, e);
            return false;
        }
        tracing::debug!("Recents {}: {} entries", op, entries.len());
        *cache = Some(entries);
        drop(cache);

        // No subscribers is fine
        let _ = self.changes.send(());
        true
    }

    fn load(&self) -> Result<Vec<RecentEntry>> {
        let slot = &self.config.slot;
        match self.settings.get(slot) {
            Ok(None) => Ok(Vec::new()),
            Ok(Some(value)) => {
                serde_json::from_value(value).map_err(|e| Error::persistence(slot, e.into()))
            }
            Err(e) => Err(Error::persistence(slot, e)),
        }
    }

    fn persist(&self, entries: &[RecentEntry]) -> Result<()> {
        let slot = &self.config.slot;
        let value = serde_json::to_value(entries).map_err(|e| Error::persistence(slot, e.into()))?;
        self.settings
            .set(slot, value)
            .map_err(|e| Error::persistence(slot, e))
    }
}
