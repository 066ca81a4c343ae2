use crate::core::config::Config;
use crate::core::snapshot::Snapshot;
use crate::error::Result;
use std::fs::read_dir;

pub fn check_environment() -> Result<()> {
    println!("🔍 labfetch - Environment Check");
    println!();

    let config = Config::load()?;

    let mut issues_found = 0;

    // Check labfetch directories
    println!("📁 Directory Structure:");
    let labfetch_dir = &config.labfetch_dir;
    println!("  labfetch directory: {:?}", labfetch_dir);

    if labfetch_dir.exists() {
        println!("    ✅ exists");
    } else {
        println!("    ❌ missing (run 'labfetch init')");
        issues_found += 1;
    }

    let snapshots_dir = config.get_snapshots_dir();
    println!("  snapshots directory: {:?}", snapshots_dir);
    if snapshots_dir.exists() {
        println!("    ✅ exists");
    } else {
        println!("    ❌ missing (run 'labfetch init')");
        issues_found += 1;
    }

    println!();

    // Check remote settings
    println!("🌐 Remote:");
    println!("  host alias: {}", config.remote_host);
    println!("  base path:  {}", config.remote_base);
    println!("  default snapshot: {}", config.default_snapshot);

    println!();

    // Check snapshot manifests parse
    println!("📸 Snapshot Manifests:");
    if snapshots_dir.exists() {
        let mut manifest_count = 0;
        for entry in read_dir(&snapshots_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                continue;
            }
            manifest_count += 1;
            match Snapshot::load(&path).and_then(|s| s.validate().map(|_| s)) {
                Ok(snapshot) => {
                    println!(
                        "  ✅ {} ({} runs)",
                        snapshot.snapshot.name,
                        snapshot.run_count()
                    );
                }
                Err(e) => {
                    println!("  ❌ {path:?}: {e}");
                    issues_found += 1;
                }
            }
        }
        if manifest_count == 0 {
            println!("  ⚠️  No manifest files, using the built-in default snapshot");
        }
    } else {
        println!("  ⚠️  No manifest files, using the built-in default snapshot");
    }

    println!();

    // Check rsync is available
    println!("🧪 Transfer Tool:");
    match which::which("rsync") {
        Ok(path) => {
            println!("  ✅ rsync found: {path:?}");
        }
        Err(_) => {
            println!("  ❌ rsync not found on PATH");
            issues_found += 1;
        }
    }

    println!();

    // Summary
    if issues_found == 0 {
        println!("🎉 Environment looks good! No issues found.");
    } else {
        println!("⚠️  Found {} issue(s) that need attention.", issues_found);
        println!();
        println!("💡 To fix issues:");
        println!("  - Run 'labfetch init' to create the config and snapshot directories");
        println!("  - Install rsync with your system package manager");
    }

    Ok(())
}
