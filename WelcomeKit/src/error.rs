use std::path::{Path, PathBuf};

use thiserror::Error;

/// Boxed cause attached to document failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Recents error: {0}")]
    Recents(#[from] recents::Error),

    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    #[must_use]
    pub fn open(path: &Path, source: impl Into<BoxError>) -> Self {
        Self::Open {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    #[must_use]
    pub fn write(path: &Path, source: impl Into<BoxError>) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
