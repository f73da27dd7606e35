/// Object key layout:
/// ```text
/// <path>/<user_id>_<epoch millis>.<extension>
/// images/temp_1663238456200.jpeg
/// ```
/// The extension is the subtype of the item's MIME type. Keys are unique per
/// millisecond only; two uploads in the same millisecond collide.

/// Stand-in used when the MIME type cannot be resolved
pub const MIME_FALLBACK: &str = "/none";

/// Extension used when the MIME type has no subtype segment
const NO_EXTENSION: &str = "none";

/// Second `/`-separated segment of a MIME type (`image/jpeg` -> `jpeg`)
pub fn extension_from_mime(mime_type: &str) -> &str {
    mime_type.split('/').nth(1).unwrap_or(NO_EXTENSION)
}

/// Build the object key for an upload at the given timestamp
pub fn build_object_key(
    path: &str,
    user_id: &str,
    mime_type: Option<&str>,
    timestamp_millis: i64,
) -> String {
    let mime = mime_type.unwrap_or(MIME_FALLBACK);
    format!(
        "{}/{}_{}.{}",
        path,
        user_id,
        timestamp_millis,
        extension_from_mime(mime)
    )
}

/// Build the object key for an upload happening now
pub fn object_key_now(path: &str, user_id: &str, mime_type: Option<&str>) -> String {
    build_object_key(
        path,
        user_id,
        mime_type,
        chrono::Utc::now().timestamp_millis(),
    )
}
