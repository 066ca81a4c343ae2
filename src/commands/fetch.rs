use crate::core::config::Config;
use crate::core::fetcher::{FailurePolicy, Fetcher};
use crate::core::plan::TransferPlan;
use crate::core::snapshot;
use crate::core::transfer::RsyncTransfer;
use crate::error::{LabFetchError, Result};
use std::path::PathBuf;

pub fn fetch(
    snapshot_name: Option<&str>,
    dest: Option<PathBuf>,
    dry_run: bool,
    fail_fast: bool,
) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(dest) = dest {
        // Per-invocation override, never written back to the config file
        config.dest_root = Some(dest);
    }

    let name = snapshot_name
        .map(str::to_string)
        .unwrap_or_else(|| config.default_snapshot.clone());
    let snapshot = snapshot::resolve(&config, &name)?;

    let plan = TransferPlan::build(&config, &snapshot);
    if plan.is_empty() {
        return Err(LabFetchError::manifest_error(format!(
            "Snapshot '{name}' contains no runs"
        )));
    }

    println!("🔄 Fetching snapshot '{name}' ({} transfers)", plan.len());
    println!("   Remote: {}:{}", config.remote_host, config.remote_base);
    println!("   Destination: {:?}", plan.tasks[0].dest);
    println!();

    if dry_run {
        println!("🔍 Dry run, nothing will be transferred:");
        for task in &plan.tasks {
            println!("   {} run {}", task.category, task.run);
            println!("     {} -> {:?}", task.source, task.dest);
        }
        return Ok(());
    }

    let transfer = RsyncTransfer::locate()?;
    let policy = if fail_fast {
        FailurePolicy::FailFast
    } else {
        FailurePolicy::KeepGoing
    };

    let fetcher = Fetcher::new(transfer, policy);
    let report = fetcher.run(&plan);
    report.print_summary(plan.len());

    if report.is_clean() {
        println!();
        println!("🎉 Snapshot '{name}' fetched");
        Ok(())
    } else {
        Err(LabFetchError::FetchIncomplete {
            failed: report.failed.len(),
            attempted: report.attempted(),
        })
    }
}
