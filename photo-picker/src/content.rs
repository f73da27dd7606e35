use std::path::{Path, PathBuf};

/// An item the user picked from the gallery.
///
/// `uri` is the opaque platform locator (`content://...` on Android,
/// `file://...` on desktop). `path` is a local file this process may read;
/// on Android the activity copies the content there before handing it over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentReference {
    pub uri: String,
    pub path: PathBuf,
}

impl ContentReference {
    pub fn new(uri: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            uri: uri.into(),
            path: path.into(),
        }
    }

    /// Reference for a plain file on disk
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            uri: format!("file://{}", path.display()),
            path,
        }
    }
}

/// Tells the MIME type of a picked item, `None` when it cannot be resolved.
pub trait MimeResolver: Send + Sync {
    fn resolve(&self, reference: &ContentReference) -> Option<String>;
}

/// Resolves from the file itself: magic bytes first, then the extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct SniffingMimeResolver;

impl MimeResolver for SniffingMimeResolver {
    fn resolve(&self, reference: &ContentReference) -> Option<String> {
        match infer::get_from_path(&reference.path) {
            Ok(Some(kind)) => return Some(kind.mime_type().to_string()),
            Ok(None) => {}
            Err(e) => log::debug!("Could not sniff {}: {}", reference.path.display(), e),
        }
        guess_mime_from_ext(&reference.path).map(str::to_string)
    }
}

/// Simple MIME lookup by file extension
fn guess_mime_from_ext(path: &Path) -> Option<&'static str> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => Some("image/jpeg"),
        Some("png") => Some("image/png"),
        Some("webp") => Some("image/webp"),
        Some("gif") => Some("image/gif"),
        Some("bmp") => Some("image/bmp"),
        _ => None,
    }
}

/// Android resolver backed by `ContentResolver.getType`.
///
/// Falls back to sniffing the local copy when the provider does not report a type.
#[cfg(target_os = "android")]
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformMimeResolver;

#[cfg(target_os = "android")]
impl MimeResolver for PlatformMimeResolver {
    fn resolve(&self, reference: &ContentReference) -> Option<String> {
        match crate::android::content_type(&reference.uri) {
            Ok(Some(mime)) => Some(mime),
            Ok(None) => SniffingMimeResolver.resolve(reference),
            Err(e) => {
                log::warn!("ContentResolver.getType failed for {}: {}", reference.uri, e);
                SniffingMimeResolver.resolve(reference)
            }
        }
    }
}

#[cfg(not(target_os = "android"))]
pub type PlatformMimeResolver = SniffingMimeResolver;
