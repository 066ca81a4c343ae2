use crate::error::{LabFetchError, Result};
use crate::utils::fs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub remote_host: String,
    pub remote_base: String,
    pub default_snapshot: String,
    pub dest_root: Option<PathBuf>,
    pub labfetch_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let labfetch_dir =
            get_labfetch_dir().unwrap_or_else(|_| PathBuf::from(".labfetch"));

        Config {
            remote_host: "supercloud".to_string(),
            remote_base: "research/FastDEQ.jl/logs".to_string(),
            default_snapshot: crate::core::snapshot::BUILTIN_SNAPSHOT_NAME.to_string(),
            dest_root: None,
            labfetch_dir,
        }
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        let labfetch_dir = get_labfetch_dir()?;

        Ok(Config {
            labfetch_dir,
            ..Config::default()
        })
    }

    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        if !config_path.exists() {
            let config = Self::new()?;
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Config = serde_json::from_str(&content)?;

        // Ensure directories exist
        fs::ensure_dir_exists(&config.labfetch_dir)?;
        fs::ensure_dir_exists(&config.get_snapshots_dir())?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = get_config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::ensure_dir_exists(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    pub fn get_snapshots_dir(&self) -> PathBuf {
        self.labfetch_dir.join("snapshots")
    }

    pub fn get_snapshot_path(&self, name: &str) -> PathBuf {
        self.get_snapshots_dir().join(format!("{name}.toml"))
    }
}

fn get_labfetch_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".labfetch"))
        .ok_or(LabFetchError::HomeDirectoryNotFound)
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_labfetch_dir()?.join("config.json"))
}
