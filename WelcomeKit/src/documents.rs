//! Filesystem-backed documents
//!
//! Two document kinds: a UTF-8 text file, and a folder whose top-level
//! entries are listed when it is opened.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use walkdir::WalkDir;

use crate::config::ContentKind;
use crate::error::{Error, Result};
use crate::ports::DocumentPort;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    Text {
        /// `None` until the document has been saved somewhere
        path: Option<PathBuf>,
        text: String,
    },
    Folder {
        path: PathBuf,
        /// Direct children, sorted by file name
        entries: Vec<PathBuf>,
    },
}

impl Document {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Text { path, .. } => path.as_deref(),
            Self::Folder { path, .. } => Some(path),
        }
    }

    #[must_use]
    pub fn is_untitled(&self) -> bool {
        self.path().is_none()
    }
}

/// Reads and writes documents directly on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDocuments;

fn list_folder(path: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(path).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::open(path, e))?;
        entries.push(entry.into_path());
    }
    Ok(entries)
}

#[async_trait(?Send)]
impl DocumentPort for FsDocuments {
    type Document = Document;

    async fn open(&self, location: &Path) -> Result<Document> {
        let metadata = fs::metadata(location).map_err(|e| Error::open(location, e))?;
        if metadata.is_dir() {
            return Ok(Document::Folder {
                path: location.to_path_buf(),
                entries: list_folder(location)?,
            });
        }

        let text = fs::read_to_string(location).map_err(|e| Error::open(location, e))?;
        Ok(Document::Text {
            path: Some(location.to_path_buf()),
            text,
        })
    }

    async fn write(&self, location: &Path, content: &[u8]) -> Result<()> {
        if let Some(parent) = location.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::write(location, e))?;
        }
        fs::write(location, content).map_err(|e| Error::write(location, e))
    }

    fn make_untitled(&self, kind: &ContentKind) -> Document {
        tracing::debug!("New untitled {} document", kind.name);
        Document::Text {
            path: None,
            text: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_text() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();

        let doc = FsDocuments.open(&path).await.unwrap();
        assert_eq!(
            doc,
            Document::Text {
                path: Some(path),
                text: "hello".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_open_folder_lists_children() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.txt"), "").unwrap();
        fs::write(temp.path().join("a.txt"), "").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub").join("deep.txt"), "").unwrap();

        let Document::Folder { entries, .. } = FsDocuments.open(temp.path()).await.unwrap() else {
            panic!("expected a folder document");
        };
        let names: Vec<_> = entries
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "sub"]);
    }

    #[tokio::test]
    async fn test_open_missing_is_open_error() {
        let temp = TempDir::new().unwrap();
        let result = FsDocuments.open(&temp.path().join("missing.txt")).await;
        assert!(matches!(result, Err(Error::Open { .. })));
    }

    #[tokio::test]
    async fn test_write_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Project").join("Project.txt");
        FsDocuments.write(&path, b"seed").await.unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "seed");
    }

    #[test]
    fn test_make_untitled() {
        let doc = FsDocuments.make_untitled(&ContentKind::plain_text());
        assert!(doc.is_untitled());
    }
}
