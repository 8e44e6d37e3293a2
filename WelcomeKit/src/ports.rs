//! Seams to the dialogs and the document model
//!
//! Both ports are async and `?Send`: workflows run on the UI thread and
//! only suspend while a dialog is up or a document is loading or saving.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::config::{ContentKind, OpenDialogConfig, SaveDialogConfig, SaveMode};
use crate::error::{Error, Result};

/// Presents open/save dialogs. `None` means the user cancelled.
#[async_trait(?Send)]
pub trait DialogPort {
    /// Ask the user for an existing location.
    async fn pick_open(&self, config: &OpenDialogConfig) -> Option<PathBuf>;

    /// Ask the user for a destination. In [`SaveMode::Package`] the result
    /// is the container directory, not the final document path.
    async fn pick_save(&self, config: &SaveDialogConfig, mode: SaveMode) -> Option<PathBuf>;
}

/// Loads and persists documents.
#[async_trait(?Send)]
pub trait DocumentPort {
    type Document;

    /// Load an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Open`] with the underlying cause.
    async fn open(&self, location: &Path) -> Result<Self::Document>;

    /// Write initial content for a new document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] with the underlying cause.
    async fn write(&self, location: &Path, content: &[u8]) -> Result<()>;

    /// A fresh document of `kind` that has no location yet.
    fn make_untitled(&self, kind: &ContentKind) -> Self::Document;
}

/// Terminal state of one open/create workflow.
///
/// Every workflow invocation returns exactly one of these.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The document was opened (and recorded as recent)
    Completed(T),
    /// The user dismissed the dialog
    Cancelled,
    /// Capability, access, or document I/O failure
    Failed(Error),
}

impl<T> Outcome<T> {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The opened document, if any
    #[must_use]
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(document) => Some(document),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Collapse into a `Result`, cancellation becoming `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns the failure carried by [`Outcome::Failed`].
    pub fn into_result(self) -> Result<Option<T>> {
        match self {
            Self::Completed(document) => Ok(Some(document)),
            Self::Cancelled => Ok(None),
            Self::Failed(e) => Err(e),
        }
    }
}
