//! Runtime permission gate.
//!
//! Only storage read access is modelled; it is the one permission the upload
//! flow needs before the gallery may be opened.

use std::future::Future;

use crate::error::PickerResult;

/// First SDK level that replaced READ_EXTERNAL_STORAGE with granular media permissions
pub const GRANULAR_MEDIA_SDK: i32 = 33;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// `android.permission.READ_EXTERNAL_STORAGE`
    ReadExternalStorage,
    /// `android.permission.READ_MEDIA_IMAGES` (Android 13+)
    ReadMediaImages,
}

impl Permission {
    /// Fully qualified Android permission name
    pub fn android_name(&self) -> &'static str {
        match self {
            Permission::ReadExternalStorage => "android.permission.READ_EXTERNAL_STORAGE",
            Permission::ReadMediaImages => "android.permission.READ_MEDIA_IMAGES",
        }
    }

    /// The storage read permission that is effective on the given SDK level
    pub fn storage_read_for_sdk(sdk_int: i32) -> Self {
        if sdk_int >= GRANULAR_MEDIA_SDK {
            Permission::ReadMediaImages
        } else {
            Permission::ReadExternalStorage
        }
    }
}

/// Asks the platform for a runtime permission.
///
/// Resolves to `true` when granted. The answer is never cached: every call
/// observes the current platform state.
pub trait PermissionGate: Send + Sync {
    fn request(&self, permission: Permission) -> impl Future<Output = PickerResult<bool>> + Send;
}

/// Android gate: checks, then requests through the hosting activity.
///
/// A storage read request is translated to the permission that applies to the
/// device's SDK level.
#[cfg(target_os = "android")]
#[derive(Debug, Clone, Default)]
pub struct PlatformPermissionGate {
    pub config: crate::picker::AndroidPickerConfig,
}

#[cfg(target_os = "android")]
impl PermissionGate for PlatformPermissionGate {
    async fn request(&self, permission: Permission) -> PickerResult<bool> {
        let config = self.config.clone();
        tokio::task::spawn_blocking(move || {
            let effective = match crate::android::sdk_int() {
                Ok(sdk) => Permission::storage_read_for_sdk(sdk),
                Err(e) => {
                    log::warn!("SDK level unknown, keeping {:?}: {}", permission, e);
                    permission
                }
            };
            log::debug!("Requesting {}", effective.android_name());
            crate::android::request_permission(&config, effective.android_name())
        })
        .await?
    }
}

/// Desktop gate: there is no runtime permission model, access is always granted.
#[cfg(not(target_os = "android"))]
#[derive(Debug, Clone, Default)]
pub struct PlatformPermissionGate;

#[cfg(not(target_os = "android"))]
impl PermissionGate for PlatformPermissionGate {
    async fn request(&self, permission: Permission) -> PickerResult<bool> {
        log::debug!("{} granted implicitly on this platform", permission.android_name());
        Ok(true)
    }
}
