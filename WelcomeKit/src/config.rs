//! Content kinds and dialog configurations

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A kind of document content the dialogs can filter on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentKind {
    /// Human readable name shown next to the filter
    pub name: String,
    /// File extensions without the dot, preferred one first
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Whether documents of this kind are directories
    #[serde(default)]
    pub is_directory: bool,
}

impl ContentKind {
    #[must_use]
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|e| (*e).to_string()).collect(),
            is_directory: false,
        }
    }

    #[must_use]
    pub fn plain_text() -> Self {
        Self::new("Plain Text", &["txt", "text"])
    }

    #[must_use]
    pub fn folder() -> Self {
        Self {
            name: "Folder".to_string(),
            extensions: Vec::new(),
            is_directory: true,
        }
    }

    /// Extension used when the toolkit has to name a file of this kind
    #[must_use]
    pub fn preferred_extension(&self) -> Option<&str> {
        self.extensions.first().map(String::as_str)
    }
}

// Default value functions for serde
fn default_open_title() -> String {
    "Open Document".to_string()
}
fn default_kinds() -> Vec<ContentKind> {
    vec![ContentKind::plain_text()]
}
fn default_true() -> bool {
    true
}
fn default_directory() -> Option<PathBuf> {
    dirs::document_dir()
}
fn default_prompt() -> String {
    "Create Document".to_string()
}
fn default_name_field_label() -> String {
    "File Name:".to_string()
}
fn default_file_name() -> String {
    "Untitled".to_string()
}
fn default_save_title() -> String {
    "Create a New Document".to_string()
}

/// Settings for the open dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenDialogConfig {
    #[serde(default = "default_open_title")]
    pub title: String,
    #[serde(default = "default_kinds")]
    pub allowed_kinds: Vec<ContentKind>,
    #[serde(default = "default_true")]
    pub can_choose_files: bool,
    #[serde(default)]
    pub can_choose_directories: bool,
    /// Initial directory; the user's documents folder by default
    #[serde(default = "default_directory")]
    pub directory: Option<PathBuf>,
}

impl Default for OpenDialogConfig {
    fn default() -> Self {
        Self {
            title: default_open_title(),
            allowed_kinds: default_kinds(),
            can_choose_files: true,
            can_choose_directories: false,
            directory: default_directory(),
        }
    }
}

impl OpenDialogConfig {
    /// Configuration that only picks directories
    #[must_use]
    pub fn folders() -> Self {
        Self {
            title: "Open Folder".to_string(),
            allowed_kinds: vec![ContentKind::folder()],
            can_choose_files: false,
            can_choose_directories: true,
            directory: default_directory(),
        }
    }
}

/// Settings for the save (create) dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveDialogConfig {
    /// Action button title
    #[serde(default = "default_prompt")]
    pub prompt: String,
    #[serde(default = "default_name_field_label")]
    pub name_field_label: String,
    #[serde(default = "default_file_name")]
    pub default_file_name: String,
    #[serde(default = "default_kinds")]
    pub allowed_kinds: Vec<ContentKind>,
    /// Kind of the document being created; names the file in package mode
    #[serde(default = "ContentKind::plain_text")]
    pub default_kind: ContentKind,
    #[serde(default = "default_save_title")]
    pub title: String,
    #[serde(default = "default_directory")]
    pub directory: Option<PathBuf>,
}

impl Default for SaveDialogConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            name_field_label: default_name_field_label(),
            default_file_name: default_file_name(),
            allowed_kinds: default_kinds(),
            default_kind: ContentKind::plain_text(),
            title: default_save_title(),
            directory: default_directory(),
        }
    }
}

/// How the location chosen in a save dialog maps to the document path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaveMode {
    /// The chosen path is the document itself
    #[default]
    File,
    /// The chosen path is a container directory holding
    /// `<container>/<container-name>.<ext>`
    Package,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_defaults() {
        let config = OpenDialogConfig::default();
        assert_eq!(config.title, "Open Document");
        assert_eq!(config.allowed_kinds, vec![ContentKind::plain_text()]);
        assert!(config.can_choose_files);
        assert!(!config.can_choose_directories);
    }

    #[test]
    fn test_save_config_from_partial_json() {
        let config: SaveDialogConfig =
            serde_json::from_str(r#"{"default_file_name": "Notes", "directory": null}"#).unwrap();
        assert_eq!(config.default_file_name, "Notes");
        assert_eq!(config.prompt, "Create Document");
        assert_eq!(config.name_field_label, "File Name:");
        assert_eq!(config.default_kind.preferred_extension(), Some("txt"));
        assert_eq!(config.directory, None);
    }

    #[test]
    fn test_folder_kind_has_no_extension() {
        assert_eq!(ContentKind::folder().preferred_extension(), None);
        assert!(ContentKind::folder().is_directory);
    }
}
