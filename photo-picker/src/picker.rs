//! Platform-specific gallery picker.
//!
//! On Android this drives the activity's GetContent launcher over JNI. On other
//! platforms it opens the native file dialog filtered to image files.

use std::future::Future;

use crate::content::ContentReference;
use crate::error::PickerResult;

/// MIME filter for "any image"
pub const IMAGE_MIME_FILTER: &str = "image/*";

const DEFAULT_MAIN_ACTIVITY_CLASS: &str = "dev/dioxus/main/MainActivity";

/// Configuration for the picker on Android
///
/// This allows customization of the MainActivity class name for different apps.
#[derive(Debug, Clone)]
pub struct AndroidPickerConfig {
    /// Fully qualified class name in slash format (e.g., "com/example/myapp/MainActivity")
    pub main_activity_class: String,
}

impl Default for AndroidPickerConfig {
    fn default() -> Self {
        Self {
            main_activity_class: DEFAULT_MAIN_ACTIVITY_CLASS.to_string(),
        }
    }
}

/// Opens the system content picker.
///
/// Resolves to `Ok(None)` when the user backs out without choosing anything.
pub trait GalleryPicker: Send + Sync {
    fn pick(
        &self,
        mime_filter: &str,
    ) -> impl Future<Output = PickerResult<Option<ContentReference>>> + Send;
}

#[cfg(target_os = "android")]
#[derive(Debug, Clone, Default)]
pub struct PlatformGalleryPicker {
    pub config: AndroidPickerConfig,
}

#[cfg(target_os = "android")]
impl GalleryPicker for PlatformGalleryPicker {
    async fn pick(&self, mime_filter: &str) -> PickerResult<Option<ContentReference>> {
        let config = self.config.clone();
        let filter = mime_filter.to_string();
        let picked =
            tokio::task::spawn_blocking(move || crate::android::pick_content(&config, &filter))
                .await??;
        Ok(picked.map(|(uri, path)| ContentReference::new(uri, path)))
    }
}

#[cfg(not(target_os = "android"))]
#[derive(Debug, Clone, Default)]
pub struct PlatformGalleryPicker;

#[cfg(not(target_os = "android"))]
impl GalleryPicker for PlatformGalleryPicker {
    async fn pick(&self, mime_filter: &str) -> PickerResult<Option<ContentReference>> {
        let extensions = extensions_for_filter(mime_filter);
        let handle = rfd::AsyncFileDialog::new()
            .add_filter("images", extensions)
            .set_title("Select Image")
            .pick_file()
            .await;
        Ok(handle.map(|h| ContentReference::from_file(h.path())))
    }
}

/// File extensions a desktop dialog offers for a MIME filter
pub fn extensions_for_filter(mime_filter: &str) -> &'static [&'static str] {
    match mime_filter {
        "image/jpeg" => &["jpg", "jpeg"],
        "image/png" => &["png"],
        "image/webp" => &["webp"],
        "image/gif" => &["gif"],
        "image/bmp" => &["bmp"],
        _ => &["jpg", "jpeg", "png", "webp", "gif", "bmp"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_filter_offers_all_image_types() {
        let exts = extensions_for_filter(IMAGE_MIME_FILTER);
        assert!(exts.contains(&"jpeg"));
        assert!(exts.contains(&"png"));
        assert!(exts.contains(&"webp"));
        assert!(!exts.contains(&"heic"));
    }

    #[test]
    fn test_specific_filter() {
        assert_eq!(extensions_for_filter("image/png"), &["png"]);
    }

    #[test]
    fn test_default_activity_class() {
        assert_eq!(
            AndroidPickerConfig::default().main_activity_class,
            "dev/dioxus/main/MainActivity"
        );
    }
}
