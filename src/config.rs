// ⚙️ Store Configuration - which backend, where it lives, which key
//
// Defaults work out of the box; `MONEYTRACKER_*` variables override them.

use crate::db::SqliteStorage;
use crate::storage::{validate_storage_key, FileStorage, KeyValueStorage, MemoryStorage};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Storage key the document lives under
pub const DEFAULT_STORAGE_KEY: &str = "moneytracker-data";

/// File name of the SQLite database inside `data_dir`
pub const SQLITE_FILE: &str = "moneytracker.db";

pub const ENV_STORAGE: &str = "MONEYTRACKER_STORAGE";
pub const ENV_DATA_DIR: &str = "MONEYTRACKER_DATA_DIR";
pub const ENV_STORAGE_KEY: &str = "MONEYTRACKER_STORAGE_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "file" | "json" => Ok(StorageBackend::File),
            "sqlite" => Ok(StorageBackend::Sqlite),
            other => Err(anyhow!("unknown storage backend: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
        }
    }
}

impl StoreConfig {
    pub fn memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            ..Self::default()
        }
    }

    /// Defaults overridden by `MONEYTRACKER_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Same as `from_env` with an injectable variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(backend) = lookup(ENV_STORAGE) {
            cfg.backend = backend.parse()?;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
            cfg.data_dir = PathBuf::from(dir);
        }
        if let Some(key) = lookup(ENV_STORAGE_KEY) {
            cfg.storage_key = key;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        validate_storage_key(&self.storage_key)
    }
}

/// Build the storage backend the config names, creating its directory
pub fn open_storage(config: &StoreConfig) -> Result<Box<dyn KeyValueStorage>> {
    config.validate()?;
    match config.backend {
        StorageBackend::Memory => {
            info!("using in-memory storage");
            Ok(Box::new(MemoryStorage::new()))
        }
        StorageBackend::File => {
            std::fs::create_dir_all(&config.data_dir).with_context(|| {
                format!("Failed to create data dir {}", config.data_dir.display())
            })?;
            info!(dir = %config.data_dir.display(), "using file storage");
            Ok(Box::new(FileStorage::new(&config.data_dir)))
        }
        StorageBackend::Sqlite => {
            std::fs::create_dir_all(&config.data_dir).with_context(|| {
                format!("Failed to create data dir {}", config.data_dir.display())
            })?;
            let path = config.data_dir.join(SQLITE_FILE);
            info!(path = %path.display(), "using sqlite storage");
            Ok(Box::new(SqliteStorage::open(&path)?))
        }
    }
}
