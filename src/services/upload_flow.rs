//! Upload chain: permission gate -> gallery picker -> object key -> upload
//!
//! Each step can end the chain. The outcome says where it ended so the screen
//! can show the matching notice.

use bucket_storage::{path, ObjectStore, UploadOrchestrator};
use photo_picker::{
    ContentReference, GalleryPicker, MimeResolver, Permission, PermissionGate, IMAGE_MIME_FILTER,
};

/// Content type sent when the MIME type of the picked item is unknown
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// Storage read access was refused; nothing else happened
    PermissionDenied,
    /// The picker was closed without a selection
    NoSelection,
    Uploaded { key: String },
    Failed { key: Option<String>, message: String },
}

/// Where a picked item goes and how it is labelled
#[derive(Debug, Clone, PartialEq)]
pub struct UploadTarget {
    pub key: String,
    pub content_type: String,
}

/// Derive the object key for a picked item: `{path}/{user_id}_{millis}.{ext}`
pub fn make_file_path<R: MimeResolver>(
    resolver: &R,
    path: &str,
    user_id: &str,
    reference: &ContentReference,
) -> UploadTarget {
    let mime = resolver.resolve(reference);
    if mime.is_none() {
        log::warn!("MIME type of {} unknown", reference.uri);
    }
    UploadTarget {
        key: path::object_key_now(path, user_id, mime.as_deref()),
        content_type: mime.unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string()),
    }
}

pub async fn run_upload_flow<G, P, R, S>(
    gate: &G,
    picker: &P,
    resolver: &R,
    uploader: &UploadOrchestrator<S>,
    folder: &str,
    user_id: &str,
) -> UploadOutcome
where
    G: PermissionGate,
    P: GalleryPicker,
    R: MimeResolver,
    S: ObjectStore,
{
    match gate.request(Permission::ReadExternalStorage).await {
        Ok(true) => {}
        Ok(false) => {
            log::info!("Storage read permission denied, gallery not opened");
            return UploadOutcome::PermissionDenied;
        }
        Err(e) => {
            log::error!("Permission request failed: {}", e);
            return UploadOutcome::Failed {
                key: None,
                message: e.to_string(),
            };
        }
    }

    let reference = match picker.pick(IMAGE_MIME_FILTER).await {
        Ok(Some(reference)) => reference,
        Ok(None) => {
            log::info!("No image selected");
            return UploadOutcome::NoSelection;
        }
        Err(e) => {
            log::error!("Gallery picker failed: {}", e);
            return UploadOutcome::Failed {
                key: None,
                message: e.to_string(),
            };
        }
    };

    let target = make_file_path(resolver, folder, user_id, &reference);
    match uploader
        .upload_file(&reference.path, &target.key, &target.content_type)
        .await
    {
        Ok(key) => UploadOutcome::Uploaded { key },
        Err(e) => UploadOutcome::Failed {
            key: Some(target.key),
            message: e.to_string(),
        },
    }
}
