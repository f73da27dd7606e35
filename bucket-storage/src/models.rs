use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::bucket::BucketUrl;

pub const DEFAULT_API_BASE: &str = "https://firebasestorage.googleapis.com";

/// Object metadata as returned by the Firebase Storage REST API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetadata {
    pub name: String,
    pub bucket: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Byte size, sent as a decimal string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Comma-separated list of download tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_tokens: Option<String>,
}

impl ObjectMetadata {
    pub fn first_download_token(&self) -> Option<&str> {
        self.download_tokens
            .as_deref()?
            .split(',')
            .map(str::trim)
            .find(|t| !t.is_empty())
    }

    pub fn size_bytes(&self) -> Option<u64> {
        self.size.as_deref()?.parse().ok()
    }
}

/// Decoded image ready for an `img` element
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub source_url: String,
    /// `data:<mime>;base64,...`
    pub data_url: String,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}

/// Configuration for the bucket client
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: BucketUrl,
    pub api_base: String,
    /// Sent as `Authorization: Firebase <token>` when present
    pub auth_token: Option<String>,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl StorageConfig {
    pub fn new(bucket: BucketUrl) -> Self {
        Self {
            bucket,
            api_base: DEFAULT_API_BASE.to_string(),
            auth_token: None,
            request_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Configuration for the image loader
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Directory for the on-disk cache, `None` keeps images in memory only
    pub cache_dir: Option<PathBuf>,
    pub memory_entries: usize,
    /// Longest edge for display; larger images are downscaled. 0 disables.
    pub max_dimension: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            memory_entries: 16,
            max_dimension: 2048,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_from_firebase_json() {
        let json = r#"{
            "name": "images/temp_1663238456200.jpeg",
            "bucket": "practicefirebase-ea757.appspot.com",
            "generation": "1663238457000000",
            "contentType": "image/jpeg",
            "size": "48213",
            "downloadTokens": "tok-1,tok-2"
        }"#;
        let meta: ObjectMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.name, "images/temp_1663238456200.jpeg");
        assert_eq!(meta.content_type.as_deref(), Some("image/jpeg"));
        assert_eq!(meta.size_bytes(), Some(48213));
        assert_eq!(meta.first_download_token(), Some("tok-1"));
    }

    #[test]
    fn test_metadata_without_tokens() {
        let json = r#"{"name": "a.png", "bucket": "b", "downloadTokens": ""}"#;
        let meta: ObjectMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.first_download_token(), None);
        assert_eq!(meta.size_bytes(), None);
    }
}
