use std::fmt;

use bucket_storage::StorageError;
use photo_picker::PickerError;

/// Central error types for the photo bucket app
#[derive(Debug)]
pub enum AppError {
    /// Bucket or image loading error
    Storage(StorageError),
    /// Permission or picker plumbing error
    Picker(PickerError),
    /// Invalid or unreadable configuration
    Config(String),
    /// Filesystem error
    Filesystem(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Storage(e) => write!(f, "Storage error: {}", e),
            AppError::Picker(e) => write!(f, "Picker error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Filesystem(e) => write!(f, "Filesystem error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Storage(e)
    }
}

impl From<PickerError> for AppError {
    fn from(e: PickerError) -> Self {
        AppError::Picker(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Filesystem(e)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(e: toml::de::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

/// User-friendly error messages for UI
impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Storage(StorageError::InvalidBucket(msg)) => {
                format!("The storage bucket is misconfigured: {}", msg)
            }
            AppError::Storage(_) => "The storage service could not be reached.".to_string(),
            AppError::Picker(PickerError::PlatformNotSupported(msg)) => msg.clone(),
            AppError::Picker(_) => "The gallery could not be opened.".to_string(),
            AppError::Config(msg) => format!("Invalid configuration: {}", msg),
            AppError::Filesystem(_) => {
                "Error accessing files. Please check app permissions.".to_string()
            }
        }
    }
}
