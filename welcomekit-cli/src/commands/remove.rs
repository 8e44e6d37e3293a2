use recents::RecentsStore;
use std::path::PathBuf;

pub fn execute(store: &RecentsStore, paths: &[PathBuf]) -> anyhow::Result<()> {
    if store.remove(paths) {
        println!("✓ Removed from recent documents");
    } else {
        println!("Nothing to remove");
    }
    Ok(())
}
