//! Recents list view-model
//!
//! Mirrors what a welcome window's recent documents list needs: the
//! current items, a selection, removal, reopening, and refreshing
//! whenever the store announces a change.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexSet;
use recents::RecentsStore;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

use crate::coordinator::OpenCoordinator;
use crate::ports::{DialogPort, DocumentPort, Outcome};

pub struct RecentsList {
    store: Arc<RecentsStore>,
    changes: broadcast::Receiver<()>,
    items: Vec<PathBuf>,
    selection: IndexSet<PathBuf>,
}

impl RecentsList {
    /// Subscribe to `store` and load the current items
    #[must_use]
    pub fn new(store: Arc<RecentsStore>) -> Self {
        let changes = store.subscribe();
        let mut list = Self {
            store,
            changes,
            items: Vec::new(),
            selection: IndexSet::new(),
        };
        list.refresh();
        list
    }

    #[must_use]
    pub fn items(&self) -> &[PathBuf] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn selection(&self) -> &IndexSet<PathBuf> {
        &self.selection
    }

    /// Replace the selection; paths not in the list are ignored
    pub fn select<I: IntoIterator<Item = PathBuf>>(&mut self, paths: I) {
        self.selection = paths
            .into_iter()
            .filter(|p| self.items.contains(p))
            .collect();
    }

    /// Reload items from the store and select the first one
    pub fn refresh(&mut self) {
        self.items = self.store.list();
        self.selection.clear();
        if let Some(first) = self.items.first() {
            self.selection.insert(first.clone());
        }
    }

    /// Refresh if any change notifications arrived since the last call.
    /// Never waits.
    pub fn poll(&mut self) -> bool {
        let mut dirty = false;
        loop {
            match self.changes.try_recv() {
                Ok(()) | Err(TryRecvError::Lagged(_)) => dirty = true,
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        if dirty {
            self.refresh();
        }
        dirty
    }

    /// Wait for the next change notification and refresh.
    /// Returns `false` once the store is gone.
    pub async fn changed(&mut self) -> bool {
        match self.changes.recv().await {
            Ok(()) | Err(RecvError::Lagged(_)) => {
                self.refresh();
                true
            }
            Err(RecvError::Closed) => false,
        }
    }

    /// Remove `paths` from the recents store
    pub fn remove<P: AsRef<Path>>(&mut self, paths: &[P]) -> bool {
        let removed = self.store.remove(paths.iter().map(AsRef::as_ref));
        if removed {
            self.refresh();
        }
        removed
    }

    /// Remove the selected items from the recents store
    pub fn remove_selected(&mut self) -> bool {
        let targets: Vec<PathBuf> = self.selection.iter().cloned().collect();
        self.remove(&targets)
    }

    /// Reopen every selected item, in selection order
    pub async fn open_selected<D, P>(&self, opener: &OpenCoordinator<D, P>) -> Vec<Outcome<P::Document>>
    where
        D: DialogPort,
        P: DocumentPort,
    {
        let mut outcomes = Vec::with_capacity(self.selection.len());
        for path in &self.selection {
            outcomes.push(opener.open_at(path).await);
        }
        outcomes
    }
}
