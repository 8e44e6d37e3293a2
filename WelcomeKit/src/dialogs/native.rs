//! Native file dialogs via rfd

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rfd::{AsyncFileDialog, AsyncMessageDialog, MessageButtons, MessageLevel};

use crate::config::{ContentKind, OpenDialogConfig, SaveDialogConfig, SaveMode};
use crate::error::Error;
use crate::ports::DialogPort;

/// Platform open/save panels.
///
/// rfd has no equivalent of a custom prompt or name field label, so
/// `SaveDialogConfig::prompt` and `name_field_label` are not shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct RfdDialogs;

impl RfdDialogs {
    /// Show `error` in a modal alert.
    pub async fn alert(&self, title: &str, error: &Error) {
        AsyncMessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title(title)
            .set_description(error.to_string())
            .set_buttons(MessageButtons::Ok)
            .show()
            .await;
    }
}

fn base_dialog(title: &str, directory: Option<&Path>) -> AsyncFileDialog {
    let dialog = AsyncFileDialog::new().set_title(title);
    match directory {
        Some(dir) => dialog.set_directory(dir),
        None => dialog,
    }
}

fn add_filters(mut dialog: AsyncFileDialog, kinds: &[ContentKind]) -> AsyncFileDialog {
    for kind in kinds.iter().filter(|k| !k.is_directory && !k.extensions.is_empty()) {
        dialog = dialog.add_filter(kind.name.as_str(), kind.extensions.as_slice());
    }
    dialog
}

/// Default name shown in the save panel's name field
fn suggested_name(config: &SaveDialogConfig, mode: SaveMode) -> String {
    let name = Path::new(&config.default_file_name);
    match mode {
        // Packages are named like a folder
        SaveMode::Package => name
            .file_stem()
            .map_or_else(|| config.default_file_name.clone(), |s| s.to_string_lossy().into_owned()),
        SaveMode::File => match (name.extension(), config.default_kind.preferred_extension()) {
            (None, Some(ext)) => format!("{}.{ext}", config.default_file_name),
            _ => config.default_file_name.clone(),
        },
    }
}

#[async_trait(?Send)]
impl DialogPort for RfdDialogs {
    async fn pick_open(&self, config: &OpenDialogConfig) -> Option<PathBuf> {
        let dialog = base_dialog(&config.title, config.directory.as_deref());

        if config.can_choose_directories && !config.can_choose_files {
            return dialog.pick_folder().await.map(|h| h.path().to_path_buf());
        }

        add_filters(dialog, &config.allowed_kinds)
            .pick_file()
            .await
            .map(|h| h.path().to_path_buf())
    }

    async fn pick_save(&self, config: &SaveDialogConfig, mode: SaveMode) -> Option<PathBuf> {
        let mut dialog = base_dialog(&config.title, config.directory.as_deref())
            .set_file_name(suggested_name(config, mode))
            .set_can_create_directories(true);

        if mode == SaveMode::File {
            dialog = add_filters(dialog, &config.allowed_kinds);
        }

        dialog.save_file().await.map(|h| h.path().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_name_file_mode_appends_extension() {
        let config = SaveDialogConfig::default();
        assert_eq!(suggested_name(&config, SaveMode::File), "Untitled.txt");
    }

    #[test]
    fn test_suggested_name_package_mode_strips_extension() {
        let config = SaveDialogConfig {
            default_file_name: "Project.proj".to_string(),
            ..SaveDialogConfig::default()
        };
        assert_eq!(suggested_name(&config, SaveMode::Package), "Project");
        assert_eq!(suggested_name(&config, SaveMode::File), "Project.proj");
    }
}
