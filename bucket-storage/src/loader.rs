//! Image loading for display
//!
//! `load(url)` looks in a bounded memory cache, then in the disk cache, and
//! only then fetches over HTTP. Decoding runs on the blocking pool; images
//! whose longest edge exceeds `max_dimension` are downscaled and re-encoded
//! as JPEG before they are turned into a `data:` URL.

use base64::{engine::general_purpose, Engine as _};
use image::{imageops::FilterType, DynamicImage, GenericImageView, ImageFormat};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, VecDeque};
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::client::check_status;
use crate::error::{StorageError, StorageResult};
use crate::models::{LoadedImage, LoaderConfig};

struct MemoryCache {
    entries: HashMap<String, LoadedImage>,
    order: VecDeque<String>,
    capacity: usize,
}

impl MemoryCache {
    fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    fn get(&self, url: &str) -> Option<LoadedImage> {
        self.entries.get(url).cloned()
    }

    fn insert(&mut self, image: LoadedImage) {
        if self.capacity == 0 {
            return;
        }
        let url = image.source_url.clone();
        if self.entries.insert(url.clone(), image).is_none() {
            self.order.push_back(url);
        }
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Fetches, decodes and caches remote images
pub struct ImageLoader {
    http: reqwest::Client,
    config: LoaderConfig,
    memory: Mutex<MemoryCache>,
}

impl ImageLoader {
    pub fn new(http: reqwest::Client, config: LoaderConfig) -> Self {
        let memory = Mutex::new(MemoryCache::new(config.memory_entries));
        Self {
            http,
            config,
            memory,
        }
    }

    /// Loader with a client of its own, for use without a bucket client
    pub fn with_own_client(config: LoaderConfig) -> Self {
        Self::new(reqwest::Client::new(), config)
    }

    pub async fn load(&self, url: &str) -> StorageResult<LoadedImage> {
        if let Some(hit) = self.memory_get(url) {
            log::debug!("Image memory cache hit: {}", url);
            return Ok(hit);
        }

        let (bytes, from_disk) = match self.disk_get(url).await {
            Some(bytes) => {
                log::debug!("Image disk cache hit: {}", url);
                (bytes, true)
            }
            None => (self.fetch(url).await?, false),
        };

        let source_url = url.to_string();
        let max_dimension = self.config.max_dimension;
        let raw = bytes.clone();
        let decoded =
            tokio::task::spawn_blocking(move || decode_for_display(source_url, raw, max_dimension))
                .await?;

        let image = match decoded {
            Ok(image) => image,
            Err(e) => {
                if from_disk {
                    self.disk_remove(url).await;
                }
                return Err(e);
            }
        };

        if !from_disk {
            self.disk_put(url, &bytes).await;
        }
        if let Ok(mut memory) = self.memory.lock() {
            memory.insert(image.clone());
        }
        Ok(image)
    }

    /// Number of images held in memory
    pub fn cached_in_memory(&self) -> usize {
        self.memory.lock().map(|m| m.len()).unwrap_or(0)
    }

    fn memory_get(&self, url: &str) -> Option<LoadedImage> {
        self.memory.lock().ok()?.get(url)
    }

    async fn fetch(&self, url: &str) -> StorageResult<Vec<u8>> {
        log::debug!("Fetching image {}", url);
        let response = self.http.get(url).send().await?;
        let response = check_status(response, url).await?;
        Ok(response.bytes().await?.to_vec())
    }

    fn disk_path(&self, url: &str) -> Option<PathBuf> {
        let dir = self.config.cache_dir.as_ref()?;
        Some(dir.join(format!("{:x}.img", Sha256::digest(url.as_bytes()))))
    }

    async fn disk_get(&self, url: &str) -> Option<Vec<u8>> {
        let path = self.disk_path(url)?;
        tokio::fs::read(&path).await.ok()
    }

    async fn disk_put(&self, url: &str, bytes: &[u8]) {
        let Some(path) = self.disk_path(url) else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                log::warn!("Could not create image cache {}: {}", parent.display(), e);
                return;
            }
        }
        if let Err(e) = tokio::fs::write(&path, bytes).await {
            log::warn!("Could not write image cache {}: {}", path.display(), e);
        }
    }

    async fn disk_remove(&self, url: &str) {
        if let Some(path) = self.disk_path(url) {
            let _ = tokio::fs::remove_file(path).await;
        }
    }
}

fn decode_for_display(
    source_url: String,
    bytes: Vec<u8>,
    max_dimension: u32,
) -> StorageResult<LoadedImage> {
    let format = image::guess_format(&bytes)
        .map_err(|e| StorageError::Decode(format!("{}: {}", source_url, e)))?;
    let img = image::load_from_memory_with_format(&bytes, format)?;
    let (width, height) = img.dimensions();

    let (data, mime_type, width, height) =
        if max_dimension > 0 && (width > max_dimension || height > max_dimension) {
            let resized = img.resize(max_dimension, max_dimension, FilterType::Lanczos3);
            let mut buffer = Cursor::new(Vec::new());
            // JPEG has no alpha channel
            DynamicImage::ImageRgb8(resized.to_rgb8()).write_to(&mut buffer, ImageFormat::Jpeg)?;
            log::debug!(
                "Downscaled {} from {}x{} to {}x{}",
                source_url,
                width,
                height,
                resized.width(),
                resized.height()
            );
            (
                buffer.into_inner(),
                ImageFormat::Jpeg.to_mime_type(),
                resized.width(),
                resized.height(),
            )
        } else {
            (bytes, format.to_mime_type(), width, height)
        };

    let data_url = format!(
        "data:{};base64,{}",
        mime_type,
        general_purpose::STANDARD.encode(&data)
    );

    Ok(LoadedImage {
        source_url,
        data_url,
        mime_type: mime_type.to_string(),
        width,
        height,
    })
}
