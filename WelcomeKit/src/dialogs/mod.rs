//! Dialog port implementations

#[cfg(feature = "gui")]
mod native;

#[cfg(feature = "gui")]
pub use native::RfdDialogs;

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::config::{OpenDialogConfig, SaveDialogConfig, SaveMode};
use crate::ports::DialogPort;

/// Dialogs that answer from queues of preset responses instead of asking
/// the user. An empty queue behaves like a cancelled dialog.
///
/// Used by the command line front end and for scripting workflows.
#[derive(Debug, Default)]
pub struct PresetDialogs {
    open: Mutex<VecDeque<Option<PathBuf>>>,
    save: Mutex<VecDeque<Option<PathBuf>>>,
    presented: AtomicUsize,
}

impl PresetDialogs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an open dialog that selects `location`
    pub fn answer_open(&self, location: impl Into<PathBuf>) -> &Self {
        self.open.lock().push_back(Some(location.into()));
        self
    }

    /// Queue an open dialog the user dismisses
    pub fn cancel_open(&self) -> &Self {
        self.open.lock().push_back(None);
        self
    }

    /// Queue a save dialog that chooses `destination`
    pub fn answer_save(&self, destination: impl Into<PathBuf>) -> &Self {
        self.save.lock().push_back(Some(destination.into()));
        self
    }

    /// Queue a save dialog the user dismisses
    pub fn cancel_save(&self) -> &Self {
        self.save.lock().push_back(None);
        self
    }

    /// How many dialogs have been presented so far
    #[must_use]
    pub fn presented(&self) -> usize {
        self.presented.load(Ordering::SeqCst)
    }
}

#[async_trait(?Send)]
impl DialogPort for PresetDialogs {
    async fn pick_open(&self, config: &OpenDialogConfig) -> Option<PathBuf> {
        self.presented.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("Preset open dialog: {}", config.title);
        self.open.lock().pop_front().flatten()
    }

    async fn pick_save(&self, config: &SaveDialogConfig, _mode: SaveMode) -> Option<PathBuf> {
        self.presented.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("Preset save dialog: {}", config.title);
        self.save.lock().pop_front().flatten()
    }
}
