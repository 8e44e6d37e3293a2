use std::path::Path;
use std::sync::Arc;

use recents::RecentsStore;
use welcomekit::{FsDocuments, OpenCoordinator, OpenDialogConfig, PresetDialogs, RfdDialogs};

use super::report;

pub async fn execute(store: Arc<RecentsStore>, path: Option<&Path>, folders: bool) -> anyhow::Result<()> {
    let documents = Arc::new(FsDocuments);

    let outcome = match path {
        Some(path) => {
            OpenCoordinator::new(store, Arc::new(PresetDialogs::new()), documents)
                .open_at(path)
                .await
        }
        None => {
            let config = if folders {
                OpenDialogConfig::folders()
            } else {
                OpenDialogConfig::default()
            };
            OpenCoordinator::new(store, Arc::new(RfdDialogs), documents)
                .open_with_dialog(&config)
                .await
        }
    };
    report(outcome)
}
