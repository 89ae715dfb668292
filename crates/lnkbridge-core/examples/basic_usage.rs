//! Basic usage example - create a shortcut and read it back

use anyhow::Result;
use lnkbridge::{ShortcutRecord, ShortcutStore};

fn main() -> Result<()> {
    // RUST_LOG=debug shows the store's per-operation logging.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let store = ShortcutStore::new();

    // Put the shortcut on the desktop, or wherever the first argument says.
    let folder = std::env::args()
        .nth(1)
        .unwrap_or_else(|| store.resolve_special_folder("desktop"));
    if folder.is_empty() {
        anyhow::bail!("no target folder: pass one as the first argument");
    }

    println!("Creating shortcut in: {}", folder);

    let mut record = ShortcutRecord::for_location(&folder, "lnkbridge-example");
    record.set_path("/usr/bin/env");
    record.arguments = Some("true".into());
    record.description = Some("Created by the lnkbridge example".into());
    store.save(&record)?;

    let loaded = store.load(&folder, "lnkbridge-example")?;
    println!("Read back:");
    println!("  target      = {}", loaded.path.unwrap_or_default());
    println!("  arguments   = {}", loaded.arguments.unwrap_or_default());
    println!("  description = {}", loaded.description.unwrap_or_default());

    for key in ["desktop", "personal", "programs", "program_files"] {
        let path = store.resolve_special_folder(key);
        let shown = if path.is_empty() {
            "<not available>"
        } else {
            path.as_str()
        };
        println!("special folder {key:<14} -> {shown}");
    }

    Ok(())
}
