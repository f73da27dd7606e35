//! Fakes shared by the flow tests

use bucket_storage::{ObjectMetadata, ObjectStore, StorageError, StorageResult};
use photo_picker::{ContentReference, MimeResolver};
use std::sync::Mutex;

/// Store that records `(key, content_type)` of every put
#[derive(Default)]
pub struct FakeStore {
    pub puts: Mutex<Vec<(String, String)>>,
    pub fail_with: Option<String>,
}

impl ObjectStore for FakeStore {
    async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<ObjectMetadata> {
        if let Some(msg) = &self.fail_with {
            return Err(StorageError::Http(msg.clone()));
        }
        self.puts
            .lock()
            .unwrap()
            .push((key.to_string(), content_type.to_string()));
        Ok(ObjectMetadata {
            name: key.to_string(),
            bucket: "test-bucket".to_string(),
            content_type: Some(content_type.to_string()),
            size: Some(data.len().to_string()),
            download_tokens: None,
        })
    }

    async fn download_url(&self, key: &str) -> StorageResult<String> {
        Err(StorageError::NotFound(key.to_string()))
    }
}

/// Resolver answering the same MIME type for every reference
pub struct FixedMime(pub Option<String>);

impl MimeResolver for FixedMime {
    fn resolve(&self, _reference: &ContentReference) -> Option<String> {
        self.0.clone()
    }
}
