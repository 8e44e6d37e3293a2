use std::path::Path;
use std::sync::Arc;

use recents::RecentsStore;
use welcomekit::{
    ContentKind, CreateCoordinator, DialogPort, FsDocuments, PresetDialogs, RfdDialogs,
    SaveDialogConfig, SaveMode,
};

use super::report;

async fn create<D: DialogPort>(
    store: Arc<RecentsStore>,
    dialogs: D,
    config: &SaveDialogConfig,
    mode: SaveMode,
) -> anyhow::Result<()> {
    let outcome = CreateCoordinator::new(store, Arc::new(dialogs), Arc::new(FsDocuments))
        .create_with_dialog(config, mode)
        .await;
    report(outcome)
}

pub async fn execute(
    store: Arc<RecentsStore>,
    path: Option<&Path>,
    package: bool,
    kind: &str,
) -> anyhow::Result<()> {
    let extension = kind.trim_start_matches('.');
    let default_kind = ContentKind::new(extension.to_uppercase(), &[extension]);
    let config = SaveDialogConfig {
        allowed_kinds: vec![default_kind.clone()],
        default_kind,
        ..SaveDialogConfig::default()
    };
    let mode = if package { SaveMode::Package } else { SaveMode::File };

    match path {
        Some(path) => {
            let dialogs = PresetDialogs::new();
            dialogs.answer_save(path);
            create(store, dialogs, &config, mode).await
        }
        None => create(store, RfdDialogs, &config, mode).await,
    }
}
