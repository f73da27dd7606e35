//! JNI bridge into the hosting MainActivity.
//!
//! The activity owns the activity-result launchers (permission request and
//! GetContent). The call sequences live in `bridge`; this module provides the
//! JNI side of them.

use jni::objects::{JClass, JObject, JString, JValue};
use jni::JNIEnv;
use ndk_context::android_context;

use crate::bridge::{self, ActivityBridge, POLL_ATTEMPTS};
use crate::error::{PickerError, PickerResult};
use crate::picker::AndroidPickerConfig;

/// Android `PackageManager.PERMISSION_GRANTED`
const PERMISSION_GRANTED: i32 = 0;

fn bridge_err(what: &str, e: impl std::fmt::Display) -> PickerError {
    PickerError::Bridge(format!("{}: {}", what, e))
}

/// Attach the current thread to the VM and run `f` with its environment
fn with_env<T>(f: impl FnOnce(&mut JNIEnv) -> PickerResult<T>) -> PickerResult<T> {
    let vm_ptr = android_context().vm() as *mut *const jni::sys::JNIInvokeInterface_;
    let vm = unsafe { jni::JavaVM::from_raw(vm_ptr) }.map_err(|e| bridge_err("JavaVM failed", e))?;
    let mut env = vm
        .attach_current_thread()
        .map_err(|e| bridge_err("JNI attach failed", e))?;
    f(&mut env)
}

fn clear_pending_exception(env: &mut JNIEnv) {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_clear();
    }
}

fn get_app_class_loader<'a>(env: &mut JNIEnv<'a>) -> PickerResult<JObject<'a>> {
    let at_cls = env
        .find_class("android/app/ActivityThread")
        .map_err(|e| bridge_err("ActivityThread not found", e))?;
    let at = env
        .call_static_method(
            &at_cls,
            "currentActivityThread",
            "()Landroid/app/ActivityThread;",
            &[],
        )
        .map_err(|e| bridge_err("currentActivityThread failed", e))?
        .l()
        .map_err(|e| bridge_err("currentActivityThread invalid", e))?;

    let app = env
        .call_method(&at, "getApplication", "()Landroid/app/Application;", &[])
        .map_err(|e| bridge_err("getApplication failed", e))?
        .l()
        .map_err(|e| bridge_err("getApplication invalid", e))?;

    // Fall back to the system context before the application is bound
    let owner = if app.is_null() {
        env.call_method(&at, "getSystemContext", "()Landroid/app/ContextImpl;", &[])
            .map_err(|e| bridge_err("getSystemContext failed", e))?
            .l()
            .map_err(|e| bridge_err("getSystemContext invalid", e))?
    } else {
        app
    };

    env.call_method(&owner, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
        .map_err(|e| bridge_err("getClassLoader failed", e))?
        .l()
        .map_err(|e| bridge_err("getClassLoader invalid", e))
}

fn load_class<'a>(
    env: &mut JNIEnv<'a>,
    loader: &JObject<'a>,
    fq_slash: &str,
) -> PickerResult<JClass<'a>> {
    // ClassLoader.loadClass wants the dotted binary name
    let name = JObject::from(
        env.new_string(fq_slash.replace('/', "."))
            .map_err(|e| bridge_err("new_string failed", e))?,
    );
    let cls_obj = env
        .call_method(
            loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&name)],
        )
        .map_err(|e| bridge_err("ClassLoader.loadClass failed", e))?
        .l()
        .map_err(|e| bridge_err("loadClass invalid", e))?;
    Ok(JClass::from(cls_obj))
}

fn get_activity_instance<'a>(
    env: &mut JNIEnv<'a>,
    config: &AndroidPickerConfig,
) -> PickerResult<(JObject<'a>, JClass<'a>)> {
    let loader = get_app_class_loader(env)?;
    let cls = load_class(env, &loader, &config.main_activity_class)?;
    let signature = format!("()L{};", config.main_activity_class);

    // `@JvmStatic getInstance()` first, then the Kotlin companion object
    let instance = match env.call_static_method(&cls, "getInstance", &signature, &[]) {
        Ok(val) => val
            .l()
            .map_err(|e| bridge_err("getInstance() returned invalid object", e))?,
        Err(_) => {
            clear_pending_exception(env);
            let comp_signature = format!("L{}$Companion;", config.main_activity_class);
            let companion = env
                .get_static_field(&cls, "Companion", &comp_signature)
                .map_err(|e| bridge_err("Failed to get Companion field", e))?
                .l()
                .map_err(|e| bridge_err("Companion field invalid", e))?;
            if companion.is_null() {
                return Err(PickerError::Bridge(
                    "MainActivity.Companion is null - activity not initialized?".to_string(),
                ));
            }
            env.call_method(&companion, "getInstance", &signature, &[])
                .map_err(|e| bridge_err("Companion.getInstance() failed", e))?
                .l()
                .map_err(|e| bridge_err("Companion.getInstance() returned invalid object", e))?
        }
    };

    if instance.is_null() {
        return Err(PickerError::Bridge(
            "MainActivity instance is null - Activity not initialized?".to_string(),
        ));
    }

    Ok((instance, cls))
}

fn static_string(env: &mut JNIEnv, cls: &JClass, method: &str) -> PickerResult<Option<String>> {
    let obj = env
        .call_static_method(cls, method, "()Ljava/lang/String;", &[])
        .map_err(|e| bridge_err(method, e))?
        .l()
        .map_err(|e| bridge_err(method, e))?;
    if obj.is_null() {
        return Ok(None);
    }
    let value: String = env
        .get_string(&JString::from(obj))
        .map_err(|e| bridge_err("String conversion failed", e))?
        .into();
    Ok(Some(value))
}

/// The hosting activity instance and its class, seen through one JNI env
struct JniActivity<'a, 'e> {
    env: &'e mut JNIEnv<'a>,
    activity: JObject<'a>,
    cls: JClass<'a>,
}

impl ActivityBridge for JniActivity<'_, '_> {
    fn call_static(&mut self, method: &str) -> PickerResult<()> {
        self.env
            .call_static_method(&self.cls, method, "()V", &[])
            .map_err(|e| bridge_err(method, e))?;
        Ok(())
    }

    fn call_with_string(&mut self, method: &str, arg: &str) -> PickerResult<()> {
        let value = JObject::from(
            self.env
                .new_string(arg)
                .map_err(|e| bridge_err("new_string failed", e))?,
        );
        self.env
            .call_method(
                &self.activity,
                method,
                "(Ljava/lang/String;)V",
                &[JValue::Object(&value)],
            )
            .map_err(|e| bridge_err(method, e))?;
        Ok(())
    }

    fn static_string(&mut self, method: &str) -> PickerResult<Option<String>> {
        static_string(self.env, &self.cls, method)
    }
}

/// `Build.VERSION.SDK_INT` of the running device
pub(crate) fn sdk_int() -> PickerResult<i32> {
    with_env(|env| {
        let cls = env
            .find_class("android/os/Build$VERSION")
            .map_err(|e| bridge_err("Build.VERSION not found", e))?;
        env.get_static_field(&cls, "SDK_INT", "I")
            .map_err(|e| bridge_err("SDK_INT failed", e))?
            .i()
            .map_err(|e| bridge_err("SDK_INT invalid", e))
    })
}

/// Check the permission and, if missing, request it and wait for the answer
pub(crate) fn request_permission(
    config: &AndroidPickerConfig,
    permission: &str,
) -> PickerResult<bool> {
    with_env(|env| {
        let (activity, cls) = get_activity_instance(env, config)?;

        let name = JObject::from(
            env.new_string(permission)
                .map_err(|e| bridge_err("new_string failed", e))?,
        );
        let state = env
            .call_method(
                &activity,
                "checkSelfPermission",
                "(Ljava/lang/String;)I",
                &[JValue::Object(&name)],
            )
            .map_err(|e| bridge_err("checkSelfPermission failed", e))?
            .i()
            .map_err(|e| bridge_err("checkSelfPermission invalid", e))?;
        if state == PERMISSION_GRANTED {
            log::debug!("{} already granted", permission);
            return Ok(true);
        }

        let mut host = JniActivity { env, activity, cls };
        bridge::await_permission(&mut host, permission, POLL_ATTEMPTS)
    })
}

/// Launch the GetContent picker and wait for `(content_uri, local_copy_path)`
pub(crate) fn pick_content(
    config: &AndroidPickerConfig,
    mime_filter: &str,
) -> PickerResult<Option<(String, String)>> {
    with_env(|env| {
        let (activity, cls) = get_activity_instance(env, config)?;
        let mut host = JniActivity { env, activity, cls };
        bridge::await_content(&mut host, mime_filter, POLL_ATTEMPTS)
    })
}

/// `ContentResolver.getType(Uri.parse(uri))`
pub(crate) fn content_type(uri: &str) -> PickerResult<Option<String>> {
    with_env(|env| {
        let context = unsafe { JObject::from_raw(android_context().context() as jni::sys::jobject) };
        let resolver = env
            .call_method(
                &context,
                "getContentResolver",
                "()Landroid/content/ContentResolver;",
                &[],
            )
            .map_err(|e| bridge_err("getContentResolver failed", e))?
            .l()
            .map_err(|e| bridge_err("getContentResolver invalid", e))?;

        let uri_cls = env
            .find_class("android/net/Uri")
            .map_err(|e| bridge_err("Uri not found", e))?;
        let raw = JObject::from(
            env.new_string(uri)
                .map_err(|e| bridge_err("new_string failed", e))?,
        );
        let parsed = env
            .call_static_method(
                &uri_cls,
                "parse",
                "(Ljava/lang/String;)Landroid/net/Uri;",
                &[JValue::Object(&raw)],
            )
            .map_err(|e| bridge_err("Uri.parse failed", e))?
            .l()
            .map_err(|e| bridge_err("Uri.parse invalid", e))?;

        let mime = env
            .call_method(
                &resolver,
                "getType",
                "(Landroid/net/Uri;)Ljava/lang/String;",
                &[JValue::Object(&parsed)],
            )
            .map_err(|e| bridge_err("getType failed", e))?
            .l()
            .map_err(|e| bridge_err("getType invalid", e))?;
        if mime.is_null() {
            return Ok(None);
        }
        let value: String = env
            .get_string(&JString::from(mime))
            .map_err(|e| bridge_err("String conversion failed", e))?
            .into();
        Ok(Some(value))
    })
}
