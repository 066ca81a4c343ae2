use crate::core::plan::TransferTask;
use crate::error::{LabFetchError, Result};
use crate::utils::fs;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

/// A one-shot, one-directional copy of a remote directory tree into a local
/// directory. Implementations block until the copy finishes.
pub trait Transfer {
    fn transfer(&self, task: &TransferTask) -> Result<()>;
}

/// Production transfer that re-executes the system `rsync` binary, the same
/// way the shell invocation does: verbose, partial with progress, recursive,
/// and relative so the run id after `/./` is reproduced under the
/// destination.
pub struct RsyncTransfer {
    rsync_path: PathBuf,
}

impl RsyncTransfer {
    /// Find `rsync` on PATH. Implementing the rsync algorithm here is out of
    /// scope; without the binary there is nothing to run.
    pub fn locate() -> Result<Self> {
        let rsync_path = which::which("rsync").map_err(|_| LabFetchError::RsyncNotFound)?;
        Ok(Self { rsync_path })
    }

    fn args(task: &TransferTask) -> Vec<OsString> {
        vec![
            OsString::from("-vPrR"),
            OsString::from(&task.source),
            task.dest.clone().into_os_string(),
        ]
    }
}

impl Transfer for RsyncTransfer {
    fn transfer(&self, task: &TransferTask) -> Result<()> {
        fs::ensure_dir_exists(&task.dest)?;

        let status = Command::new(&self.rsync_path)
            .args(Self::args(task))
            .status()?;

        if !status.success() {
            return Err(LabFetchError::TransferFailed {
                category: task.category.clone(),
                run: task.run,
                code: status.code(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsync_argument_order() {
        let task = TransferTask {
            category: "SKIP".to_string(),
            run: 18010271,
            source: "supercloud:research/FastDEQ.jl/logs/data-CIFAR10_type-SKIP_size-TINY_discrete-false_jfb-false/./18010271/".to_string(),
            dest: PathBuf::from("cifar10/tiny"),
        };

        let args = RsyncTransfer::args(&task);
        assert_eq!(
            args,
            vec![
                OsString::from("-vPrR"),
                OsString::from(task.source.as_str()),
                OsString::from("cifar10/tiny"),
            ]
        );
    }
}
