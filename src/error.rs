use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LabFetchError>;

#[derive(Error, Debug)]
pub enum LabFetchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    #[error("Snapshot '{name}' not found")]
    SnapshotNotFound { name: String },

    #[error("Snapshot manifest error: {message}")]
    SnapshotManifestError { message: String },

    #[error("rsync not found on PATH")]
    RsyncNotFound,

    #[error("Transfer failed for {category} run {run}: rsync exited with status {code:?}")]
    TransferFailed {
        category: String,
        run: u64,
        code: Option<i32>,
    },

    #[error("{failed} of {attempted} transfers failed")]
    FetchIncomplete { failed: usize, attempted: usize },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },
}

impl From<dialoguer::Error> for LabFetchError {
    fn from(error: dialoguer::Error) -> Self {
        LabFetchError::ConfigError {
            message: error.to_string(),
        }
    }
}

impl LabFetchError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        LabFetchError::ConfigError {
            message: message.into(),
        }
    }

    pub fn manifest_error<S: Into<String>>(message: S) -> Self {
        LabFetchError::SnapshotManifestError {
            message: message.into(),
        }
    }
}
