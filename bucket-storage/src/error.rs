/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while talking to the bucket or loading images
#[derive(Debug)]
pub enum StorageError {
    InvalidBucket(String),
    InvalidUrl(String),
    NotFound(String),
    Unauthorized(String),
    /// Object exists but carries no download token
    NoDownloadToken(String),
    Http(String),
    Network(reqwest::Error),
    Decode(String),
    IoError(std::io::Error),
    Other(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::InvalidBucket(e) => write!(f, "Invalid bucket: {}", e),
            StorageError::InvalidUrl(e) => write!(f, "Invalid URL: {}", e),
            StorageError::NotFound(e) => write!(f, "Object not found: {}", e),
            StorageError::Unauthorized(e) => write!(f, "Not authorized: {}", e),
            StorageError::NoDownloadToken(e) => write!(f, "No download token for {}", e),
            StorageError::Http(e) => write!(f, "HTTP error: {}", e),
            StorageError::Network(e) => write!(f, "Network error: {}", e),
            StorageError::Decode(e) => write!(f, "Decode error: {}", e),
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
            StorageError::Other(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::IoError(err)
    }
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        StorageError::Network(err)
    }
}

impl From<image::ImageError> for StorageError {
    fn from(err: image::ImageError) -> Self {
        StorageError::Decode(err.to_string())
    }
}

impl From<tokio::task::JoinError> for StorageError {
    fn from(err: tokio::task::JoinError) -> Self {
        StorageError::Other(format!("Task join error: {}", err))
    }
}
