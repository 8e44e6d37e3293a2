use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use recents::{JsonSettings, PathCapabilities, RecentsStore, normalize_key};
use tempfile::TempDir;
use welcomekit::{
    ContentKind, Document, FsDocuments, OpenDialogConfig, PresetDialogs, SaveDialogConfig,
    SaveMode, Welcome,
};

fn welcome(settings: &std::path::Path, dialogs: PresetDialogs) -> Welcome<PresetDialogs, FsDocuments> {
    let store = RecentsStore::new(
        Arc::new(JsonSettings::new(settings)),
        Arc::new(PathCapabilities),
    );
    Welcome::new(Arc::new(store), dialogs, FsDocuments)
}

#[tokio::test]
async fn test_create_then_reopen_after_restart() {
    let temp = TempDir::new().unwrap();
    let settings = temp.path().join("config").join("settings.json");
    let target = temp.path().join("docs").join("Notes.txt");

    let dialogs = PresetDialogs::new();
    dialogs.answer_save(&target);
    let app = welcome(&settings, dialogs)
        .map_creator(|c| c.with_content(|_, _| b"first line\n".to_vec()));

    let created = app
        .create_document(&SaveDialogConfig::default(), SaveMode::File)
        .await
        .into_result()
        .unwrap()
        .unwrap();
    assert_eq!(created.path(), Some(target.as_path()));
    assert_eq!(fs::read_to_string(&target).unwrap(), "first line\n");
    drop(app);

    // Fresh store over the same settings file
    let app = welcome(&settings, PresetDialogs::new());
    let list = app.recents_list();
    assert_eq!(list.items(), &[PathBuf::from(normalize_key(&target))]);

    let reopened = app.open_recent(&list.items()[0]).await.completed().unwrap();
    assert_eq!(
        reopened,
        Document::Text {
            path: Some(list.items()[0].clone()),
            text: "first line\n".to_string()
        }
    );
}

#[tokio::test]
async fn test_package_project_on_disk() {
    let temp = TempDir::new().unwrap();
    let settings = temp.path().join("settings.json");
    let container = temp.path().join("Garden");

    let dialogs = PresetDialogs::new();
    dialogs.answer_save(&container);
    let app = welcome(&settings, dialogs);
    let config = SaveDialogConfig {
        default_kind: ContentKind::new("Garden Project", &["garden"]),
        directory: None,
        ..SaveDialogConfig::default()
    };

    let outcome = app.create_document(&config, SaveMode::Package).await;
    assert!(outcome.is_completed());

    let inner = container.join("Garden.garden");
    assert!(inner.is_file());
    assert_eq!(app.store().list(), vec![PathBuf::from(normalize_key(&inner))]);
}

#[tokio::test]
async fn test_open_folder_and_missing_file() {
    let temp = TempDir::new().unwrap();
    let settings = temp.path().join("settings.json");
    let project = temp.path().join("Project");
    fs::create_dir(&project).unwrap();
    fs::write(project.join("main.txt"), "").unwrap();

    let dialogs = PresetDialogs::new();
    dialogs.answer_open(&project);
    dialogs.answer_open(temp.path().join("gone.txt"));
    let app = welcome(&settings, dialogs);

    let folder = app
        .open_document(&OpenDialogConfig::folders())
        .await
        .completed()
        .unwrap();
    assert!(matches!(folder, Document::Folder { ref entries, .. } if entries.len() == 1));

    // Capability cannot be created for a missing file
    let missing = app.open_document(&OpenDialogConfig::default()).await;
    assert!(matches!(
        missing.error(),
        Some(welcomekit::Error::Recents(recents::Error::CapabilityCreation { .. }))
    ));
    assert_eq!(app.store().len(), 1);
}

#[tokio::test]
async fn test_presented_hook_on_facade() {
    let temp = TempDir::new().unwrap();
    let shown = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = shown.clone();
    let app = welcome(&temp.path().join("settings.json"), PresetDialogs::new()).on_presented(move || {
        counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    });

    assert!(app.open_document(&OpenDialogConfig::default()).await.is_cancelled());
    assert!(
        app.create_document(&SaveDialogConfig::default(), SaveMode::File)
            .await
            .is_cancelled()
    );
    assert_eq!(shown.load(std::sync::atomic::Ordering::SeqCst), 2);
}
