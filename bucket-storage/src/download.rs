//! Resolve an object key and hand the URL to the image loader

use std::sync::Arc;

use crate::error::StorageResult;
use crate::loader::ImageLoader;
use crate::models::LoadedImage;
use crate::store::ObjectStore;

pub struct DownloadOrchestrator<S> {
    store: Arc<S>,
    loader: Arc<ImageLoader>,
}

impl<S> Clone for DownloadOrchestrator<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            loader: self.loader.clone(),
        }
    }
}

impl<S: ObjectStore> DownloadOrchestrator<S> {
    pub fn new(store: Arc<S>, loader: Arc<ImageLoader>) -> Self {
        Self { store, loader }
    }

    /// Resolve `key` to a URL and load the image behind it.
    ///
    /// Failures are logged here; the caller keeps whatever it displayed before.
    pub async fn show(&self, key: &str) -> StorageResult<LoadedImage> {
        match self.resolve_and_load(key).await {
            Ok(image) => {
                log::info!(
                    "Loaded {} ({}x{}, {})",
                    key,
                    image.width,
                    image.height,
                    image.mime_type
                );
                Ok(image)
            }
            Err(e) => {
                log::error!("Download of {} failed => {}", key, e);
                Err(e)
            }
        }
    }

    async fn resolve_and_load(&self, key: &str) -> StorageResult<LoadedImage> {
        let url = self.store.download_url(key).await?;
        log::debug!("Resolved {} to {}", key, url);
        self.loader.load(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::models::LoaderConfig;
    use crate::upload::tests::RecordingStore;
    use image::{DynamicImage, ImageFormat};
    use std::io::Cursor;

    fn loader() -> Arc<ImageLoader> {
        Arc::new(ImageLoader::new(
            reqwest::Client::new(),
            LoaderConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_show_resolves_and_loads() {
        let mut png = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(image::RgbaImage::new(3, 2))
            .write_to(&mut png, ImageFormat::Png)
            .unwrap();

        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/media")
            .with_status(200)
            .with_body(png.into_inner())
            .create_async()
            .await;

        let store = Arc::new(RecordingStore {
            download_url: Some(format!("{}/media", server.url())),
            ..RecordingStore::default()
        });
        let orchestrator = DownloadOrchestrator::new(store, loader());

        let image = orchestrator
            .show("images/temp_1663238456200.jpeg")
            .await
            .unwrap();
        assert_eq!((image.width, image.height), (3, 2));
        assert_eq!(image.mime_type, "image/png");
    }

    #[tokio::test]
    async fn test_failed_download_logs_error() {
        crate::log_capture::start();
        let orchestrator = DownloadOrchestrator::new(Arc::new(RecordingStore::default()), loader());

        let result = orchestrator.show("images/temp_1663238456200.jpeg").await;

        assert!(result.is_err());
        let errors = crate::log_capture::messages_at(log::Level::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("images/temp_1663238456200.jpeg"));
    }

    #[tokio::test]
    async fn test_unresolvable_key_never_hits_loader() {
        let store = Arc::new(RecordingStore::default());
        let loader = loader();
        let orchestrator = DownloadOrchestrator::new(store, loader.clone());

        let err = orchestrator
            .show("images/temp_1663238456200.jpeg")
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::NotFound(_)));
        assert_eq!(loader.cached_in_memory(), 0);
    }
}
