//! Upload of a picked file to the bucket
//!
//! One attempt per call: the outcome is logged and returned, nothing is retried
//! and nothing is rolled back.

use std::path::Path;
use std::sync::Arc;

use crate::error::StorageResult;
use crate::store::ObjectStore;

/// Service for uploading local files under a derived object key
pub struct UploadOrchestrator<S> {
    store: Arc<S>,
}

impl<S> Clone for UploadOrchestrator<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: ObjectStore> UploadOrchestrator<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Upload the file at `local_path` to `key`, returning the key on success
    pub async fn upload_file(
        &self,
        local_path: &Path,
        key: &str,
        content_type: &str,
    ) -> StorageResult<String> {
        match self.put(local_path, key, content_type).await {
            Ok(()) => {
                // The key is the only handle to the object; callers decide whether to keep it
                log::info!("Upload succeeded, object key => {}", key);
                Ok(key.to_string())
            }
            Err(e) => {
                log::error!("Upload of {} failed => {}", key, e);
                Err(e)
            }
        }
    }

    async fn put(&self, local_path: &Path, key: &str, content_type: &str) -> StorageResult<()> {
        let data = tokio::fs::read(local_path).await?;
        let metadata = self.store.put_object(key, data, content_type).await?;
        log::debug!(
            "Stored {} in {} ({} bytes)",
            metadata.name,
            metadata.bucket,
            metadata.size_bytes().unwrap_or_default()
        );
        Ok(())
    }
}
