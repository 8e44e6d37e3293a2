//! `WelcomeKit` - document workflows behind an app's welcome window
//!
//! Opening and creating documents through dialogs, and keeping the recent
//! documents list those workflows feed.
use std::path::Path;
use std::sync::Arc;

// Re-export recents
pub use recents;

pub mod config;
pub mod coordinator;
pub mod dialogs;
pub mod documents;
pub mod error;
pub mod list;
pub mod ports;

pub use config::{ContentKind, OpenDialogConfig, SaveDialogConfig, SaveMode};
pub use coordinator::{CreateCoordinator, OpenCoordinator, document_path};
pub use dialogs::PresetDialogs;
#[cfg(feature = "gui")]
pub use dialogs::RfdDialogs;
pub use documents::{Document, FsDocuments};
pub use error::{Error, Result};
pub use list::RecentsList;
pub use ports::{DialogPort, DocumentPort, Outcome};

use recents::RecentsStore;

/// Main welcome-window interface
pub struct Welcome<D, P> {
    store: Arc<RecentsStore>,
    opener: OpenCoordinator<D, P>,
    creator: CreateCoordinator<D, P>,
}

impl<D: DialogPort, P: DocumentPort> Welcome<D, P> {
    #[must_use]
    pub fn new(store: Arc<RecentsStore>, dialogs: D, documents: P) -> Self {
        let opener = OpenCoordinator::new(Arc::clone(&store), Arc::new(dialogs), Arc::new(documents));
        Self {
            store,
            creator: CreateCoordinator::from_opener(opener.clone()),
            opener,
        }
    }

    /// Run `hook` right before any dialog is shown
    #[must_use]
    pub fn on_presented(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        let hook = Arc::new(hook);
        let for_create = Arc::clone(&hook);
        self.opener = self.opener.on_presented(move || hook());
        self.creator = self.creator.on_presented(move || for_create());
        self
    }

    /// Replace the create workflow, e.g. to set a content provider
    #[must_use]
    pub fn map_creator(
        mut self,
        f: impl FnOnce(CreateCoordinator<D, P>) -> CreateCoordinator<D, P>,
    ) -> Self {
        self.creator = f(self.creator);
        self
    }

    #[must_use]
    pub fn store(&self) -> &Arc<RecentsStore> {
        &self.store
    }

    #[must_use]
    pub fn opener(&self) -> &OpenCoordinator<D, P> {
        &self.opener
    }

    #[must_use]
    pub fn creator(&self) -> &CreateCoordinator<D, P> {
        &self.creator
    }

    /// A list view-model subscribed to this store
    #[must_use]
    pub fn recents_list(&self) -> RecentsList {
        RecentsList::new(Arc::clone(&self.store))
    }

    // High-level operations
    pub async fn open_document(&self, config: &OpenDialogConfig) -> Outcome<P::Document> {
        self.opener.open_with_dialog(config).await
    }

    pub async fn open_recent(&self, location: &Path) -> Outcome<P::Document> {
        self.opener.open_at(location).await
    }

    pub async fn create_document(&self, config: &SaveDialogConfig, mode: SaveMode) -> Outcome<P::Document> {
        self.creator.create_with_dialog(config, mode).await
    }
}
