use crate::core::config::{self, Config};
use crate::core::snapshot::Snapshot;
use crate::error::Result;
use crate::utils::fs;
use dialoguer::Confirm;

pub fn init(force: bool) -> Result<()> {
    println!("🔧 Initializing labfetch");
    println!();

    let config_path = config::get_config_path()?;

    if config_path.exists() && !force {
        let overwrite = Confirm::new()
            .with_prompt(format!(
                "Config already exists at {config_path:?}. Overwrite with defaults?"
            ))
            .default(false)
            .interact()?;

        if !overwrite {
            println!("Keeping existing configuration.");
            return Ok(());
        }
    }

    let config = Config::new()?;
    fs::ensure_dir_exists(&config.labfetch_dir)?;
    fs::ensure_dir_exists(&config.get_snapshots_dir())?;
    config.save()?;
    println!("✅ Wrote config: {config_path:?}");

    let snapshot = Snapshot::builtin();
    let snapshot_path = config.get_snapshot_path(&snapshot.snapshot.name);
    if snapshot_path.exists() && !force {
        println!("✅ Snapshot manifest already present: {snapshot_path:?}");
    } else {
        snapshot.save(&snapshot_path)?;
        println!("✅ Wrote snapshot manifest: {snapshot_path:?}");
    }

    println!();
    println!("🎉 labfetch is ready!");
    println!();
    println!("Next steps:");
    println!("  labfetch plan              # review what would be copied");
    println!("  labfetch fetch             # copy the default snapshot");
    println!("  labfetch doctor            # check rsync and remote settings");

    Ok(())
}
