use bucket_storage::{BucketUrl, LoaderConfig, StorageConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_BUCKET_URL: &str = "gs://practicefirebase-ea757.appspot.com";
pub const DEFAULT_UPLOAD_FOLDER: &str = "images";
/// Placeholder identity until a real sign-in exists
pub const DEFAULT_USER_ID: &str = "temp";
pub const DEFAULT_DOWNLOAD_KEY: &str = "images/temp_1663238456200.jpeg";

/// App configuration, read once at start-up from `config.toml`.
///
/// Every field is optional in the file; missing ones keep their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub bucket_url: String,
    pub upload_folder: String,
    pub user_id: String,
    pub download_key: String,
    pub api_base: String,
    pub auth_token: Option<String>,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// BCP 47 tag of the UI language
    pub language: String,
    pub image_cache: ImageCacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageCacheConfig {
    pub memory_entries: usize,
    pub max_dimension: u32,
    /// Keep fetched images on disk between launches
    pub disk: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bucket_url: DEFAULT_BUCKET_URL.to_string(),
            upload_folder: DEFAULT_UPLOAD_FOLDER.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            download_key: DEFAULT_DOWNLOAD_KEY.to_string(),
            api_base: bucket_storage::models::DEFAULT_API_BASE.to_string(),
            auth_token: None,
            request_timeout_secs: 60,
            connect_timeout_secs: 10,
            language: "en-US".to_string(),
            image_cache: ImageCacheConfig::default(),
        }
    }
}

impl Default for ImageCacheConfig {
    fn default() -> Self {
        let loader = LoaderConfig::default();
        Self {
            memory_entries: loader.memory_entries,
            max_dimension: loader.max_dimension,
            disk: true,
        }
    }
}

impl AppConfig {
    pub fn from_toml(s: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn storage_config(&self) -> Result<StorageConfig, AppError> {
        if self.request_timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(AppError::Config(
                "request_timeout_secs and connect_timeout_secs must be at least 1".to_string(),
            ));
        }
        let mut storage = StorageConfig::new(BucketUrl::parse(&self.bucket_url)?);
        storage.api_base = self.api_base.clone();
        storage.auth_token = self.auth_token.clone().filter(|t| !t.trim().is_empty());
        storage.request_timeout = Duration::from_secs(self.request_timeout_secs);
        storage.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        Ok(storage)
    }

    pub fn loader_config(&self, cache_dir: Option<PathBuf>) -> LoaderConfig {
        LoaderConfig {
            cache_dir: cache_dir.filter(|_| self.image_cache.disk),
            memory_entries: self.image_cache.memory_entries,
            max_dimension: self.image_cache.max_dimension,
        }
    }
}
