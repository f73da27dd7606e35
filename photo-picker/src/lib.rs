//! # Photo Picker
//!
//! Runtime permission handling and gallery picking for image uploads.
//!
//! This crate provides:
//! - A [`PermissionGate`] that asks the platform for storage read access
//! - A [`GalleryPicker`] that opens the system content picker for `image/*`
//! - A [`ContentReference`] describing the picked item and a [`MimeResolver`]
//!   that tells its MIME type
//!
//! ## Platform Separation
//!
//! On Android every call goes through JNI into the hosting `MainActivity`,
//! which owns the activity-result launchers. On desktop there is no runtime
//! permission model, so the gate always grants, and picking uses the native
//! file dialog.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use photo_picker::{GalleryPicker, PermissionGate, Permission, IMAGE_MIME_FILTER};
//!
//! let gate = photo_picker::PlatformPermissionGate::default();
//! let picker = photo_picker::PlatformGalleryPicker::default();
//!
//! if gate.request(Permission::ReadExternalStorage).await? {
//!     if let Some(reference) = picker.pick(IMAGE_MIME_FILTER).await? {
//!         println!("picked {}", reference.uri);
//!     }
//! }
//! ```

pub mod content;
pub mod error;
pub mod permission;
pub mod picker;

#[cfg(target_os = "android")]
mod android;
#[cfg(any(target_os = "android", test))]
mod bridge;

pub use content::{ContentReference, MimeResolver, PlatformMimeResolver, SniffingMimeResolver};
pub use error::{PickerError, PickerResult};
pub use permission::{Permission, PermissionGate, PlatformPermissionGate};
pub use picker::{AndroidPickerConfig, GalleryPicker, PlatformGalleryPicker, IMAGE_MIME_FILTER};
