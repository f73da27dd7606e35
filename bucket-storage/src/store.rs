use std::future::Future;

use crate::error::StorageResult;
use crate::models::ObjectMetadata;

/// Key-addressed remote object storage.
///
/// Implemented by [`crate::FirebaseStorage`]; the orchestrators only see this
/// trait so the client can be injected.
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key`
    fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> impl Future<Output = StorageResult<ObjectMetadata>> + Send;

    /// Resolve a URL the object can be fetched from
    fn download_url(&self, key: &str) -> impl Future<Output = StorageResult<String>> + Send;
}
