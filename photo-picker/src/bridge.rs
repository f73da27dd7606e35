//! Call sequences against the hosting activity.
//!
//! The activity keeps the outcome of its launchers in static fields that Rust
//! polls. Every sequence resets the fields it reads before it launches, so a
//! result left over from an earlier request is never mistaken for a new one.

use std::time::Duration;

use crate::error::{PickerError, PickerResult};

pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(100);
/// 600 x 100ms = 60 seconds
pub(crate) const POLL_ATTEMPTS: u32 = 600;

/// Marker the activity reports through `getLastError` when the user backs out
const CANCELLED_MARKER: &str = "cancelled";

/// The activity methods the sequences need
pub(crate) trait ActivityBridge {
    /// Static `()V` method on the activity class
    fn call_static(&mut self, method: &str) -> PickerResult<()>;
    /// Instance `(Ljava/lang/String;)V` method on the activity
    fn call_with_string(&mut self, method: &str, arg: &str) -> PickerResult<()>;
    /// Static `()Ljava/lang/String;` getter, `None` for null
    fn static_string(&mut self, method: &str) -> PickerResult<Option<String>>;
    fn wait(&mut self) {
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Request `permission` and wait for the dialog's answer
pub(crate) fn await_permission<B: ActivityBridge>(
    bridge: &mut B,
    permission: &str,
    attempts: u32,
) -> PickerResult<bool> {
    bridge.call_static("clearLastPermissionResult")?;
    bridge.call_with_string("requestStoragePermission", permission)?;

    for _ in 0..attempts {
        bridge.wait();
        match bridge.static_string("getLastPermissionResult")?.as_deref() {
            Some("granted") => return Ok(true),
            Some("denied") => return Ok(false),
            _ => {}
        }
    }

    Err(PickerError::Timeout(
        "Permission dialog timeout - no answer given".to_string(),
    ))
}

/// Launch the content picker and wait for `(content_uri, local_copy_path)`.
///
/// `Ok(None)` when the user cancelled.
pub(crate) fn await_content<B: ActivityBridge>(
    bridge: &mut B,
    mime_filter: &str,
    attempts: u32,
) -> PickerResult<Option<(String, String)>> {
    bridge.call_static("clearLastContentResult")?;
    bridge.call_static("clearLastError")?;
    bridge.call_with_string("launchContentPicker", mime_filter)?;

    for _ in 0..attempts {
        bridge.wait();

        if let Some(uri) = bridge.static_string("getLastContentUri")? {
            let path = bridge
                .static_string("getLastPhotoPath")?
                .ok_or_else(|| PickerError::Bridge(format!("No readable copy for {}", uri)))?;
            return Ok(Some((uri, path)));
        }

        if let Some(err) = bridge.static_string("getLastError")? {
            if err == CANCELLED_MARKER {
                return Ok(None);
            }
            return Err(PickerError::Other(err));
        }
    }

    Err(PickerError::Timeout(
        "Image picker timeout - no selection made".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Activity double: static fields plus what each launch will produce
    #[derive(Default)]
    struct FakeActivity {
        statics: HashMap<&'static str, String>,
        on_launch: Vec<(&'static str, String)>,
        calls: Vec<String>,
    }

    impl ActivityBridge for FakeActivity {
        fn call_static(&mut self, method: &str) -> PickerResult<()> {
            self.calls.push(method.to_string());
            match method {
                "clearLastContentResult" => {
                    self.statics.remove("getLastContentUri");
                    self.statics.remove("getLastPhotoPath");
                }
                "clearLastError" => {
                    self.statics.remove("getLastError");
                }
                "clearLastPermissionResult" => {
                    self.statics.remove("getLastPermissionResult");
                }
                _ => {}
            }
            Ok(())
        }

        fn call_with_string(&mut self, method: &str, arg: &str) -> PickerResult<()> {
            self.calls.push(format!("{}({})", method, arg));
            for (getter, value) in self.on_launch.drain(..) {
                self.statics.insert(getter, value);
            }
            Ok(())
        }

        fn static_string(&mut self, method: &str) -> PickerResult<Option<String>> {
            Ok(self.statics.get(method).cloned())
        }

        fn wait(&mut self) {}
    }

    fn picked(uri: &str, path: &str) -> Vec<(&'static str, String)> {
        vec![
            ("getLastContentUri", uri.to_string()),
            ("getLastPhotoPath", path.to_string()),
        ]
    }

    #[test]
    fn test_pick_returns_uri_and_copy() {
        let mut activity = FakeActivity {
            on_launch: picked("content://media/1", "/data/files/1.jpg"),
            ..FakeActivity::default()
        };

        let result = await_content(&mut activity, "image/*", 3).unwrap();
        assert_eq!(
            result,
            Some(("content://media/1".to_string(), "/data/files/1.jpg".to_string()))
        );
        assert_eq!(activity.calls.last().unwrap(), "launchContentPicker(image/*)");
    }

    #[test]
    fn test_previous_pick_is_not_returned_again() {
        let mut activity = FakeActivity {
            on_launch: picked("content://media/1", "/data/files/1.jpg"),
            ..FakeActivity::default()
        };
        await_content(&mut activity, "image/*", 3).unwrap();

        // Second launch is cancelled; the first selection is still in the statics
        activity.on_launch = vec![("getLastError", "cancelled".to_string())];
        let second = await_content(&mut activity, "image/*", 3).unwrap();

        assert_eq!(second, None);
    }

    #[test]
    fn test_results_cleared_before_launch() {
        let mut activity = FakeActivity::default();
        let _ = await_content(&mut activity, "image/*", 1);

        let launch = activity
            .calls
            .iter()
            .position(|c| c.starts_with("launchContentPicker"))
            .unwrap();
        let clear = activity
            .calls
            .iter()
            .position(|c| c == "clearLastContentResult")
            .unwrap();
        assert!(clear < launch);
    }

    #[test]
    fn test_picker_error_is_reported() {
        let mut activity = FakeActivity {
            on_launch: vec![("getLastError", "copy failed".to_string())],
            ..FakeActivity::default()
        };
        assert_eq!(
            await_content(&mut activity, "image/*", 3),
            Err(PickerError::Other("copy failed".to_string()))
        );
    }

    #[test]
    fn test_no_answer_times_out() {
        let mut activity = FakeActivity::default();
        assert!(matches!(
            await_content(&mut activity, "image/*", 2),
            Err(PickerError::Timeout(_))
        ));
        assert!(matches!(
            await_permission(&mut activity, "android.permission.READ_MEDIA_IMAGES", 2),
            Err(PickerError::Timeout(_))
        ));
    }

    #[test]
    fn test_stale_permission_answer_is_cleared() {
        let mut activity = FakeActivity::default();
        activity
            .statics
            .insert("getLastPermissionResult", "granted".to_string());

        // The dialog never answers; the earlier grant must not count
        let result =
            await_permission(&mut activity, "android.permission.READ_EXTERNAL_STORAGE", 3);
        assert!(matches!(result, Err(PickerError::Timeout(_))));
    }
}
