use recents::RecentsStore;

pub fn execute(store: &RecentsStore) -> anyhow::Result<()> {
    let items = store.list();
    if items.is_empty() {
        println!("No recent documents");
        return Ok(());
    }
    for (i, path) in items.iter().enumerate() {
        println!("{:>3}  {}", i + 1, path.display());
    }
    let hidden = store.len() - items.len();
    if hidden > 0 {
        println!("({hidden} entries could not be resolved)");
    }
    Ok(())
}
