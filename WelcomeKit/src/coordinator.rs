//! Open and create workflows
//!
//! ```text
//! dialog ──cancel──────────────────────────────────────────▶ Cancelled
//!   │ location
//!   ▼
//! capability ─▶ scope(begin) ─▶ open ─ok─▶ record recent ─▶ Completed
//!   │               │             └─err──────────────────▶ Failed
//!   └─err───────────┴─denied─────────────────────────────▶ Failed
//! ```
//!
//! Access is released when the scope ends, whichever way it ends.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use recents::{RecentsStore, with_scope_async};

use crate::config::{ContentKind, OpenDialogConfig, SaveDialogConfig, SaveMode};
use crate::error::{Error, Result};
use crate::ports::{DialogPort, DocumentPort, Outcome};

/// Called right before a dialog is shown
pub type PresentedHook = Arc<dyn Fn() + Send + Sync>;

/// Produces the initial bytes of a new document
pub type ContentProvider = Arc<dyn Fn(&Path, &ContentKind) -> Vec<u8> + Send + Sync>;

/// Final document path for a location picked in a save dialog.
///
/// Package destinations get `<container>/<container-name>.<ext>`, where the
/// extension is the kind's preferred one, or `file` if it has none.
#[must_use]
pub fn document_path(chosen: &Path, mode: SaveMode, kind: &ContentKind) -> PathBuf {
    match mode {
        SaveMode::File => chosen.to_path_buf(),
        SaveMode::Package => {
            let name = chosen
                .file_name()
                .map_or_else(|| "Untitled".to_string(), |n| n.to_string_lossy().into_owned());
            let ext = kind.preferred_extension().unwrap_or("file");
            chosen.join(format!("{name}.{ext}"))
        }
    }
}

/// Drives open dialog → access scope → document load → recents.
pub struct OpenCoordinator<D, P> {
    store: Arc<RecentsStore>,
    dialogs: Arc<D>,
    documents: Arc<P>,
    on_presented: Option<PresentedHook>,
}

impl<D, P> Clone for OpenCoordinator<D, P> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            dialogs: Arc::clone(&self.dialogs),
            documents: Arc::clone(&self.documents),
            on_presented: self.on_presented.clone(),
        }
    }
}

impl<D: DialogPort, P: DocumentPort> OpenCoordinator<D, P> {
    #[must_use]
    pub fn new(store: Arc<RecentsStore>, dialogs: Arc<D>, documents: Arc<P>) -> Self {
        Self {
            store,
            dialogs,
            documents,
            on_presented: None,
        }
    }

    #[must_use]
    pub fn on_presented(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_presented = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn store(&self) -> &Arc<RecentsStore> {
        &self.store
    }

    /// Let the user pick a document and open it.
    pub async fn open_with_dialog(&self, config: &OpenDialogConfig) -> Outcome<P::Document> {
        self.notify_presented();
        let Some(location) = self.dialogs.pick_open(config).await else {
            tracing::info!("Open dialog cancelled");
            return Outcome::Cancelled;
        };
        self.open_at(&location).await
    }

    /// Open a known location, e.g. an item picked from the recents list.
    pub async fn open_at(&self, location: &Path) -> Outcome<P::Document> {
        match self.open_and_record(location).await {
            Ok(document) => {
                tracing::info!("Opened {}", location.display());
                Outcome::Completed(document)
            }
            Err(e) => {
                tracing::warn!("Could not open {}: {}", location.display(), e);
                Outcome::Failed(e)
            }
        }
    }

    async fn open_and_record(&self, location: &Path) -> Result<P::Document> {
        let provider = Arc::clone(self.store.capabilities());
        let capability = match self.store.find(location) {
            Some(existing) => existing,
            None => provider.create(location)?,
        };

        let documents = &self.documents;
        let store = &self.store;
        with_scope_async(provider, capability, move |_| async move {
            let document = documents.open(location).await?;
            store.record_opened(location);
            Ok::<_, Error>(document)
        })
        .await?
    }

    fn notify_presented(&self) {
        if let Some(hook) = &self.on_presented {
            hook();
        }
    }
}

/// Drives save dialog → initial write → the open workflow.
pub struct CreateCoordinator<D, P> {
    opener: OpenCoordinator<D, P>,
    content: Option<ContentProvider>,
}

impl<D: DialogPort, P: DocumentPort> CreateCoordinator<D, P> {
    #[must_use]
    pub fn new(store: Arc<RecentsStore>, dialogs: Arc<D>, documents: Arc<P>) -> Self {
        Self::from_opener(OpenCoordinator::new(store, dialogs, documents))
    }

    /// Share ports and hook with an existing open coordinator
    #[must_use]
    pub fn from_opener(opener: OpenCoordinator<D, P>) -> Self {
        Self {
            opener,
            content: None,
        }
    }

    /// Use `provider` for the initial content instead of an empty file
    #[must_use]
    pub fn with_content(
        mut self,
        provider: impl Fn(&Path, &ContentKind) -> Vec<u8> + Send + Sync + 'static,
    ) -> Self {
        self.content = Some(Arc::new(provider));
        self
    }

    #[must_use]
    pub fn on_presented(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.opener = self.opener.on_presented(hook);
        self
    }

    /// Let the user choose a destination, write the new document there, and
    /// open it.
    pub async fn create_with_dialog(
        &self,
        config: &SaveDialogConfig,
        mode: SaveMode,
    ) -> Outcome<P::Document> {
        self.opener.notify_presented();
        let Some(chosen) = self.opener.dialogs.pick_save(config, mode).await else {
            tracing::info!("Save dialog cancelled");
            return Outcome::Cancelled;
        };

        let destination = document_path(&chosen, mode, &config.default_kind);
        let content = self
            .content
            .as_ref()
            .map(|provider| provider(&destination, &config.default_kind))
            .unwrap_or_default();

        if let Err(e) = self.opener.documents.write(&destination, &content).await {
            tracing::warn!("Could not create {}: {}", destination.display(), e);
            return Outcome::Failed(e);
        }
        tracing::debug!("Wrote {} bytes to {}", content.len(), destination.display());

        self.opener.open_at(&destination).await
    }

    /// A new document with no location, nothing written or recorded
    #[must_use]
    pub fn new_untitled(&self, kind: &ContentKind) -> P::Document {
        self.opener.documents.make_untitled(kind)
    }
}
