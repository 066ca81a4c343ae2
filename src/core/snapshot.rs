use crate::core::config::Config;
use crate::error::{LabFetchError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the snapshot that ships built in. It reproduces the run set the
/// tool was originally written for, so `labfetch fetch` works before any
/// manifest has been created on disk.
pub const BUILTIN_SNAPSHOT_NAME: &str = "cifar10-tiny";

/// Snapshot manifest structure matching the `<name>.toml` format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub snapshot: SnapshotMetadata,
    #[serde(default, rename = "category")]
    pub categories: Vec<CategoryRuns>,
}

/// Core snapshot metadata: which experiment family the runs belong to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub name: String,
    pub dataset: String,
    pub size: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub discrete: bool,
    #[serde(default)]
    pub jfb: bool,
}

/// One experiment variant and the ordered run ids recorded under it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRuns {
    pub name: String,
    pub runs: Vec<u64>,
}

impl Snapshot {
    /// Load a snapshot manifest from a file path
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();
            return Err(LabFetchError::SnapshotNotFound { name });
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a snapshot manifest from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| LabFetchError::SnapshotManifestError {
            message: e.to_string(),
        })
    }

    /// Serialize the manifest to TOML format
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| LabFetchError::SnapshotManifestError {
            message: e.to_string(),
        })
    }

    /// Save the manifest to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        fs::write(path, content)?;
        Ok(())
    }

    /// The run set baked into the original fetch script, kept as a named
    /// manifest so later experiment batches land next to it instead of
    /// replacing it.
    pub fn builtin() -> Self {
        Snapshot {
            snapshot: SnapshotMetadata {
                name: BUILTIN_SNAPSHOT_NAME.to_string(),
                dataset: "CIFAR10".to_string(),
                size: "TINY".to_string(),
                description: Some("FastDEQ CIFAR10 runs at TINY width".to_string()),
                discrete: false,
                jfb: false,
            },
            categories: vec![
                CategoryRuns {
                    name: "SKIPV2".to_string(),
                    runs: vec![18010267, 18010268, 18010269],
                },
                CategoryRuns {
                    name: "SKIP".to_string(),
                    runs: vec![18014477, 18010271, 18010272],
                },
                CategoryRuns {
                    name: "VANILLA".to_string(),
                    runs: vec![18014141, 18014142, 18014144],
                },
            ],
        }
    }

    /// Total number of runs across all categories
    pub fn run_count(&self) -> usize {
        self.categories.iter().map(|c| c.runs.len()).sum()
    }

    /// Validate the manifest has all required fields
    pub fn validate(&self) -> Result<()> {
        if self.snapshot.name.is_empty() {
            return Err(LabFetchError::manifest_error("Snapshot name is required"));
        }

        if !self
            .snapshot
            .name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == '_')
        {
            return Err(LabFetchError::manifest_error(
                "Snapshot name can only contain alphanumeric characters, dots, hyphens, and underscores",
            ));
        }

        if self.snapshot.dataset.is_empty() || self.snapshot.size.is_empty() {
            return Err(LabFetchError::manifest_error(
                "Snapshot dataset and size labels are required",
            ));
        }

        if self.categories.is_empty() {
            return Err(LabFetchError::manifest_error(
                "Snapshot must declare at least one category",
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for category in &self.categories {
            if category.name.is_empty() {
                return Err(LabFetchError::manifest_error("Category name is required"));
            }
            if !seen.insert(category.name.as_str()) {
                return Err(LabFetchError::manifest_error(format!(
                    "Duplicate category '{}'",
                    category.name
                )));
            }
            if category.runs.is_empty() {
                return Err(LabFetchError::manifest_error(format!(
                    "Category '{}' has no runs",
                    category.name
                )));
            }
        }

        Ok(())
    }
}

/// Resolve a snapshot by name: a manifest file in the snapshots directory
/// wins, the built-in default applies when no file shadows it.
pub fn resolve(config: &Config, name: &str) -> Result<Snapshot> {
    let path = config.get_snapshot_path(name);
    if path.exists() {
        let snapshot = Snapshot::load(&path)?;
        snapshot.validate()?;
        return Ok(snapshot);
    }

    if name == BUILTIN_SNAPSHOT_NAME {
        return Ok(Snapshot::builtin());
    }

    Err(LabFetchError::SnapshotNotFound {
        name: name.to_string(),
    })
}
