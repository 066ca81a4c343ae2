use crate::core::config::Config;
use crate::core::snapshot::{Snapshot, BUILTIN_SNAPSHOT_NAME};
use crate::error::Result;
use std::fs::read_dir;

pub fn list_snapshots() -> Result<()> {
    let config = Config::load()?;
    let snapshots_dir = config.get_snapshots_dir();

    let mut snapshots: Vec<(Snapshot, bool)> = Vec::new();

    if snapshots_dir.exists() {
        let mut paths: Vec<_> = read_dir(&snapshots_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("toml"))
            .collect();
        paths.sort();

        for path in paths {
            match Snapshot::load(&path) {
                Ok(snapshot) => snapshots.push((snapshot, false)),
                Err(e) => {
                    println!("⚠️  Skipping unreadable manifest {path:?}: {e}");
                }
            }
        }
    }

    // The built-in snapshot is available even before `labfetch init` has
    // written a manifest file, unless a file of the same name shadows it.
    if !snapshots
        .iter()
        .any(|(s, _)| s.snapshot.name == BUILTIN_SNAPSHOT_NAME)
    {
        snapshots.push((Snapshot::builtin(), true));
    }

    println!("Available snapshots:");
    println!();

    for (snapshot, builtin) in &snapshots {
        let marker = if snapshot.snapshot.name == config.default_snapshot {
            "* "
        } else {
            "  "
        };
        let origin = if *builtin { " (built-in)" } else { "" };

        println!("{}{}{}", marker, snapshot.snapshot.name, origin);
        println!(
            "    {}/{}, {} categories, {} runs",
            snapshot.snapshot.dataset,
            snapshot.snapshot.size,
            snapshot.categories.len(),
            snapshot.run_count()
        );
        if let Some(description) = &snapshot.snapshot.description {
            println!("    {description}");
        }
    }

    println!();
    println!("Fetch one with 'labfetch fetch --snapshot <name>'");

    Ok(())
}
