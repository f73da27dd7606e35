//! # Bucket Storage
//!
//! Object storage for picked photos, backed by a Firebase Storage bucket.
//!
//! This crate provides:
//! - [`BucketUrl`] parsing for `gs://` bucket addresses
//! - Object key building from folder, user id and MIME type ([`path`])
//! - A REST client for Firebase Storage implementing [`ObjectStore`]
//! - [`UploadOrchestrator`] and [`DownloadOrchestrator`] that log their outcome
//! - An [`ImageLoader`] that fetches, decodes, caches and prepares images for display
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use bucket_storage::{BucketUrl, FirebaseStorage, StorageConfig, UploadOrchestrator};
//! use std::sync::Arc;
//!
//! let bucket = BucketUrl::parse("gs://my-app.appspot.com")?;
//! let store = Arc::new(FirebaseStorage::new(StorageConfig::new(bucket))?);
//!
//! let key = bucket_storage::path::object_key_now("images", "temp", Some("image/jpeg"));
//! UploadOrchestrator::new(store).upload_file(path, &key, "image/jpeg").await?;
//! ```

pub mod bucket;
pub mod client;
pub mod download;
pub mod error;
pub mod loader;
#[cfg(test)]
mod log_capture;
pub mod models;
pub mod path;
pub mod store;
pub mod upload;

pub use bucket::BucketUrl;
pub use client::FirebaseStorage;
pub use download::DownloadOrchestrator;
pub use error::{StorageError, StorageResult};
pub use loader::ImageLoader;
pub use models::{LoadedImage, LoaderConfig, ObjectMetadata, StorageConfig};
pub use store::ObjectStore;
pub use upload::UploadOrchestrator;
