use crate::core::plan::TransferTask;
use crate::error::LabFetchError;
use chrono::{DateTime, Local};

/// A (category, run) pair whose transfer exited nonzero, with the error text
/// kept for the end-of-run summary.
#[derive(Debug, Clone)]
pub struct FailedTransfer {
    pub category: String,
    pub run: u64,
    pub message: String,
}

/// Outcome record for one fetch pass. Failures are collected rather than
/// short-circuited so the summary can name every run that needs a re-fetch.
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub started: DateTime<Local>,
    pub succeeded: Vec<(String, u64)>,
    pub failed: Vec<FailedTransfer>,
}

impl Default for FetchReport {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchReport {
    pub fn new() -> Self {
        FetchReport {
            started: Local::now(),
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn record_success(&mut self, task: &TransferTask) {
        self.succeeded.push((task.category.clone(), task.run));
    }

    pub fn record_failure(&mut self, task: &TransferTask, error: &LabFetchError) {
        self.failed.push(FailedTransfer {
            category: task.category.clone(),
            run: task.run,
            message: error.to_string(),
        });
    }

    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn print_summary(&self, planned: usize) {
        let elapsed = Local::now().signed_duration_since(self.started);

        println!();
        println!("📋 Fetch summary");
        println!("   Started:   {}", self.started.format("%Y-%m-%d %H:%M:%S"));
        println!("   Elapsed:   {}s", elapsed.num_seconds());
        println!(
            "   Transfers: {} attempted, {} succeeded, {} failed",
            self.attempted(),
            self.succeeded.len(),
            self.failed.len()
        );

        if self.attempted() < planned {
            println!("   Skipped:   {} (aborted early)", planned - self.attempted());
        }

        if !self.failed.is_empty() {
            println!();
            println!("❌ Failed transfers:");
            for failure in &self.failed {
                println!("   {} run {}", failure.category, failure.run);
                println!("     {}", failure.message);
            }
            println!();
            println!("💡 Re-run 'labfetch fetch' to retry; completed runs transfer again idempotently.");
        }
    }
}
