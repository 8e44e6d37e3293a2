use recents::RecentsStore;

pub fn execute(store: &RecentsStore) -> anyhow::Result<()> {
    anyhow::ensure!(store.clear(), "could not save the cleared list");
    println!("✓ Recent documents cleared");
    Ok(())
}
