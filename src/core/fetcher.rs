use crate::core::plan::TransferPlan;
use crate::core::report::FetchReport;
use crate::core::transfer::Transfer;

/// What to do when a transfer exits nonzero. `KeepGoing` attempts every
/// remaining task and reports all failures at the end; `FailFast` stops at
/// the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    KeepGoing,
    FailFast,
}

/// Drives a transfer plan strictly sequentially: one copy runs to completion
/// before the next starts.
pub struct Fetcher<T: Transfer> {
    transfer: T,
    policy: FailurePolicy,
}

impl<T: Transfer> Fetcher<T> {
    pub fn new(transfer: T, policy: FailurePolicy) -> Self {
        Self { transfer, policy }
    }

    pub fn run(&self, plan: &TransferPlan) -> FetchReport {
        let mut report = FetchReport::new();
        let total = plan.len();

        for (index, task) in plan.tasks.iter().enumerate() {
            println!(
                "📥 [{}/{}] {} run {}",
                index + 1,
                total,
                task.category,
                task.run
            );
            println!("   {} -> {:?}", task.source, task.dest);

            match self.transfer.transfer(task) {
                Ok(()) => report.record_success(task),
                Err(e) => {
                    println!("   ❌ {e}");
                    report.record_failure(task, &e);
                    if self.policy == FailurePolicy::FailFast {
                        break;
                    }
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::core::plan::{TransferPlan, TransferTask};
    use crate::core::snapshot::Snapshot;
    use crate::error::{LabFetchError, Result};
    use std::cell::RefCell;
    use std::path::PathBuf;

    /// Records every requested transfer instead of touching the network
    struct RecordingTransfer {
        calls: RefCell<Vec<TransferTask>>,
        fail_runs: Vec<u64>,
    }

    impl RecordingTransfer {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_runs: Vec::new(),
            }
        }

        fn failing_on(fail_runs: Vec<u64>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_runs,
            }
        }
    }

    impl Transfer for RecordingTransfer {
        fn transfer(&self, task: &TransferTask) -> Result<()> {
            self.calls.borrow_mut().push(task.clone());
            if self.fail_runs.contains(&task.run) {
                return Err(LabFetchError::TransferFailed {
                    category: task.category.clone(),
                    run: task.run,
                    code: Some(255),
                });
            }
            Ok(())
        }
    }

    fn default_plan() -> TransferPlan {
        let config = Config {
            dest_root: None,
            ..Config::default()
        };
        TransferPlan::build(&config, &Snapshot::builtin())
    }

    #[test]
    fn test_every_run_transferred_once_in_order() {
        let plan = default_plan();
        let fetcher = Fetcher::new(RecordingTransfer::new(), FailurePolicy::KeepGoing);

        let report = fetcher.run(&plan);

        assert!(report.is_clean());
        assert_eq!(report.attempted(), 9);

        let calls = fetcher.transfer.calls.borrow();
        assert_eq!(calls.len(), 9);
        for (call, task) in calls.iter().zip(&plan.tasks) {
            assert_eq!(call, task);
            assert_eq!(call.dest, PathBuf::from("cifar10/tiny"));
        }
    }

    #[test]
    fn test_rerun_is_idempotent_at_the_fetch_layer() {
        let plan = default_plan();
        let fetcher = Fetcher::new(RecordingTransfer::new(), FailurePolicy::KeepGoing);

        let first = fetcher.run(&plan);
        let second = fetcher.run(&plan);

        assert!(first.is_clean());
        assert!(second.is_clean());
        assert_eq!(fetcher.transfer.calls.borrow().len(), 18);
    }

    #[test]
    fn test_keep_going_attempts_everything_and_collects_failures() {
        let plan = default_plan();
        let stub = RecordingTransfer::failing_on(vec![18014477, 18014142]);
        let fetcher = Fetcher::new(stub, FailurePolicy::KeepGoing);

        let report = fetcher.run(&plan);

        assert_eq!(fetcher.transfer.calls.borrow().len(), 9);
        assert_eq!(report.failed.len(), 2);
        assert_eq!(report.succeeded.len(), 7);

        let failed: Vec<(String, u64)> = report
            .failed
            .iter()
            .map(|f| (f.category.clone(), f.run))
            .collect();
        assert_eq!(
            failed,
            vec![
                ("SKIP".to_string(), 18014477),
                ("VANILLA".to_string(), 18014142),
            ]
        );
    }

    #[test]
    fn test_fail_fast_stops_at_first_failure() {
        let plan = default_plan();
        let stub = RecordingTransfer::failing_on(vec![18014477]);
        let fetcher = Fetcher::new(stub, FailurePolicy::FailFast);

        let report = fetcher.run(&plan);

        // 18014477 is the fourth task in declaration order
        assert_eq!(fetcher.transfer.calls.borrow().len(), 4);
        assert_eq!(report.attempted(), 4);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].run, 18014477);
    }
}
