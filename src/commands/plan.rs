use crate::core::config::Config;
use crate::core::plan::TransferPlan;
use crate::core::snapshot;
use crate::error::Result;

pub fn show_plan(snapshot_name: Option<&str>) -> Result<()> {
    let config = Config::load()?;

    let name = snapshot_name
        .map(str::to_string)
        .unwrap_or_else(|| config.default_snapshot.clone());
    let snapshot = snapshot::resolve(&config, &name)?;
    let plan = TransferPlan::build(&config, &snapshot);

    println!("Transfer plan for snapshot '{name}':");
    println!();

    let mut current_category = "";
    for task in &plan.tasks {
        if task.category != current_category {
            println!("  {}:", task.category);
            current_category = &task.category;
        }
        println!("    {} -> {:?}", task.source, task.dest);
    }

    println!();
    println!(
        "{} transfers across {} categories",
        plan.len(),
        snapshot.categories.len()
    );

    Ok(())
}
