//! # recents
//!
//! Recent-document tracking for desktop apps.
//!
//! - **Capabilities** - opaque, renewable access tokens for locations that
//!   can go stale when the resource moves or access is revoked
//! - **Recents store** - persisted, deduplicated, capacity-bounded
//!   most-recently-used list with change notifications
//! - **Scopes** - begin/end access pairing that always releases
//! - **Settings** - the key-value slot the list is persisted in
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use recents::{JsonSettings, PathCapabilities, RecentsStore};
//!
//! let settings = JsonSettings::new("/tmp/app/settings.json");
//! let store = RecentsStore::new(Arc::new(settings), Arc::new(PathCapabilities));
//!
//! store.record_opened(Path::new("/tmp/notes.txt"));
//! for path in store.list() {
//!     println!("{}", path.display());
//! }
//! ```

pub mod capability;
pub mod config;
pub mod error;
pub mod scope;
pub mod settings;
pub mod store;

pub use capability::{AccessCapability, CapabilityProvider, PathCapabilities, normalize_key};
pub use config::{DEFAULT_CAPACITY, DEFAULT_SLOT, RecentsConfig};
pub use error::{Error, Result};
pub use scope::{ScopeGuard, with_scope, with_scope_async};
pub use settings::{JsonSettings, MemorySettings, SettingsStore};
pub use store::{RecentEntry, RecentsStore};
