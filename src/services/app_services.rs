use bucket_storage::{
    DownloadOrchestrator, FirebaseStorage, ImageLoader, LoadedImage, StorageResult,
    UploadOrchestrator,
};
use photo_picker::{PlatformGalleryPicker, PlatformMimeResolver, PlatformPermissionGate};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::filesystem;
use crate::services::download_flow::run_download_flow;
use crate::services::upload_flow::{run_upload_flow, UploadOutcome};

/// Everything the screen needs, built once at start-up and passed down.
///
/// The bucket client is created here and shared by both orchestrators; the
/// image loader reuses its connection pool.
#[derive(Clone)]
pub struct AppServices {
    pub config: Arc<AppConfig>,
    permission_gate: Arc<PlatformPermissionGate>,
    picker: Arc<PlatformGalleryPicker>,
    mime_resolver: Arc<PlatformMimeResolver>,
    uploader: UploadOrchestrator<FirebaseStorage>,
    downloader: DownloadOrchestrator<FirebaseStorage>,
}

impl PartialEq for AppServices {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.config, &other.config)
    }
}

impl AppServices {
    /// Load the config from the app data directory and build the services
    pub fn bootstrap() -> Result<Self, AppError> {
        let config = AppConfig::load(&filesystem::config_path())?;
        Self::from_config(config, Some(filesystem::image_cache_dir()))
    }

    pub fn from_config(config: AppConfig, cache_dir: Option<PathBuf>) -> Result<Self, AppError> {
        let storage = Arc::new(FirebaseStorage::new(config.storage_config()?)?);
        let loader = Arc::new(ImageLoader::new(
            storage.http_client(),
            config.loader_config(cache_dir),
        ));
        log::info!(
            "Using bucket {} (uploads to {}/ as {})",
            storage.bucket(),
            config.upload_folder,
            config.user_id
        );

        Ok(Self {
            permission_gate: Arc::new(PlatformPermissionGate::default()),
            picker: Arc::new(PlatformGalleryPicker::default()),
            mime_resolver: Arc::new(PlatformMimeResolver::default()),
            uploader: UploadOrchestrator::new(storage.clone()),
            downloader: DownloadOrchestrator::new(storage, loader),
            config: Arc::new(config),
        })
    }

    /// Permission -> picker -> key -> upload
    pub async fn upload_from_gallery(&self) -> UploadOutcome {
        run_upload_flow(
            self.permission_gate.as_ref(),
            self.picker.as_ref(),
            self.mime_resolver.as_ref(),
            &self.uploader,
            &self.config.upload_folder,
            &self.config.user_id,
        )
        .await
    }

    /// Load the configured download key
    pub async fn download_configured(&self) -> StorageResult<LoadedImage> {
        run_download_flow(&self.downloader, &self.config.download_key).await
    }
}
