/// Result type for permission and picker operations
pub type PickerResult<T> = Result<T, PickerError>;

#[derive(Debug, Clone, PartialEq)]
pub enum PickerError {
    PermissionDenied(String),
    Timeout(String),
    PlatformNotSupported(String),
    /// JNI or activity plumbing failed
    Bridge(String),
    Other(String),
}

impl std::fmt::Display for PickerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickerError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            PickerError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            PickerError::PlatformNotSupported(msg) => write!(f, "Platform not supported: {}", msg),
            PickerError::Bridge(msg) => write!(f, "Platform bridge error: {}", msg),
            PickerError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for PickerError {}

impl From<tokio::task::JoinError> for PickerError {
    fn from(err: tokio::task::JoinError) -> Self {
        PickerError::Other(format!("Task join error: {}", err))
    }
}
