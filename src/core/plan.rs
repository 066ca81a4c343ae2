use crate::core::config::Config;
use crate::core::snapshot::Snapshot;
use std::path::PathBuf;

/// One remote run directory to copy and where it lands locally. Built
/// transiently from a plan, handed to a transfer, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferTask {
    pub category: String,
    pub run: u64,
    pub source: String,
    pub dest: PathBuf,
}

/// The ordered list of transfers for one snapshot: categories in declared
/// order on the outside, run ids in declared order on the inside.
#[derive(Debug, Clone)]
pub struct TransferPlan {
    pub tasks: Vec<TransferTask>,
}

impl TransferPlan {
    pub fn build(config: &Config, snapshot: &Snapshot) -> TransferPlan {
        let dest = destination(config, snapshot);
        let mut tasks = Vec::new();

        for category in &snapshot.categories {
            for &run in &category.runs {
                tasks.push(TransferTask {
                    category: category.name.clone(),
                    run,
                    source: remote_source(config, snapshot, &category.name, run),
                    dest: dest.clone(),
                });
            }
        }

        TransferPlan { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Remote directory name for one category, as the training jobs write it
fn run_dir(snapshot: &Snapshot, category: &str) -> String {
    format!(
        "data-{}_type-{}_size-{}_discrete-{}_jfb-{}",
        snapshot.snapshot.dataset,
        category,
        snapshot.snapshot.size,
        snapshot.snapshot.discrete,
        snapshot.snapshot.jfb
    )
}

/// Full rsync source argument. The `/./` marker tells rsync where the
/// reproduced path suffix starts, so each run id becomes a subdirectory
/// of the destination.
pub fn remote_source(config: &Config, snapshot: &Snapshot, category: &str, run: u64) -> String {
    format!(
        "{}:{}/{}/./{}/",
        config.remote_host,
        config.remote_base,
        run_dir(snapshot, category),
        run
    )
}

/// Local destination directory: `<dest-root>/<dataset>/<size>`, lowercased.
/// Without a configured root the path stays relative to the working
/// directory.
pub fn destination(config: &Config, snapshot: &Snapshot) -> PathBuf {
    let relative = PathBuf::from(snapshot.snapshot.dataset.to_lowercase())
        .join(snapshot.snapshot.size.to_lowercase());

    match &config.dest_root {
        Some(root) => root.join(relative),
        None => relative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::snapshot::Snapshot;
    use pretty_assertions::assert_eq;

    fn test_config() -> Config {
        Config {
            dest_root: None,
            ..Config::default()
        }
    }

    #[test]
    fn test_plan_covers_every_run_once() {
        let snapshot = Snapshot::builtin();
        let plan = TransferPlan::build(&test_config(), &snapshot);

        assert_eq!(plan.len(), 9);

        let pairs: Vec<(String, u64)> = plan
            .tasks
            .iter()
            .map(|t| (t.category.clone(), t.run))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("SKIPV2".to_string(), 18010267),
                ("SKIPV2".to_string(), 18010268),
                ("SKIPV2".to_string(), 18010269),
                ("SKIP".to_string(), 18014477),
                ("SKIP".to_string(), 18010271),
                ("SKIP".to_string(), 18010272),
                ("VANILLA".to_string(), 18014141),
                ("VANILLA".to_string(), 18014142),
                ("VANILLA".to_string(), 18014144),
            ]
        );
    }

    #[test]
    fn test_source_matches_cluster_layout() {
        let snapshot = Snapshot::builtin();
        let source = remote_source(&test_config(), &snapshot, "SKIP", 18010271);
        assert_eq!(
            source,
            "supercloud:research/FastDEQ.jl/logs/data-CIFAR10_type-SKIP_size-TINY_discrete-false_jfb-false/./18010271/"
        );
    }

    #[test]
    fn test_destination_is_shared_by_all_tasks() {
        let snapshot = Snapshot::builtin();
        let plan = TransferPlan::build(&test_config(), &snapshot);

        for task in &plan.tasks {
            assert_eq!(task.dest, PathBuf::from("cifar10/tiny"));
        }
    }

    #[test]
    fn test_dest_root_prefixes_destination() {
        let mut config = test_config();
        config.dest_root = Some(PathBuf::from("/data/experiments"));
        let snapshot = Snapshot::builtin();

        let dest = destination(&config, &snapshot);
        assert_eq!(dest, PathBuf::from("/data/experiments/cifar10/tiny"));
    }

    #[test]
    fn test_template_flags_render_into_run_dir() {
        let mut snapshot = Snapshot::builtin();
        snapshot.snapshot.discrete = true;
        snapshot.snapshot.jfb = true;

        let source = remote_source(&test_config(), &snapshot, "VANILLA", 18014141);
        assert!(source.contains("_discrete-true_jfb-true/"));
    }
}
