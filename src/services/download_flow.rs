use bucket_storage::{DownloadOrchestrator, LoadedImage, ObjectStore, StorageResult};

/// Put a download result on the image surface.
///
/// Only a successful load replaces what is shown; on failure the surface keeps
/// its previous image and the error message is handed back.
pub fn present(
    surface: &mut Option<LoadedImage>,
    result: StorageResult<LoadedImage>,
) -> Result<(), String> {
    match result {
        Ok(image) => {
            *surface = Some(image);
            Ok(())
        }
        Err(e) => Err(e.to_string()),
    }
}

pub async fn run_download_flow<S: ObjectStore>(
    downloader: &DownloadOrchestrator<S>,
    key: &str,
) -> StorageResult<LoadedImage> {
    downloader.show(key).await
}
