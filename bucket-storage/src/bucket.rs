use crate::error::{StorageError, StorageResult};

const SCHEME: &str = "gs://";

/// A `gs://<bucket>` address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketUrl {
    name: String,
}

impl BucketUrl {
    pub fn parse(url: &str) -> StorageResult<Self> {
        let rest = url
            .trim()
            .strip_prefix(SCHEME)
            .ok_or_else(|| StorageError::InvalidBucket(format!("{} (expected gs://<bucket>)", url)))?;
        let name = rest.trim_end_matches('/');

        if name.is_empty() {
            return Err(StorageError::InvalidBucket(format!("{} (empty bucket name)", url)));
        }
        let valid = name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StorageError::InvalidBucket(format!(
                "{} (bucket names use lowercase letters, digits, '-', '_' and '.')",
                url
            )));
        }

        Ok(Self {
            name: name.to_string(),
        })
    }

    /// Bare bucket name, as used in REST paths
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for BucketUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", SCHEME, self.name)
    }
}

impl std::str::FromStr for BucketUrl {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_firebase_bucket() {
        let bucket = BucketUrl::parse("gs://practicefirebase-ea757.appspot.com").unwrap();
        assert_eq!(bucket.name(), "practicefirebase-ea757.appspot.com");
        assert_eq!(bucket.to_string(), "gs://practicefirebase-ea757.appspot.com");
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let bucket: BucketUrl = "gs://photos-bucket/".parse().unwrap();
        assert_eq!(bucket.name(), "photos-bucket");
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(matches!(
            BucketUrl::parse("https://photos-bucket"),
            Err(StorageError::InvalidBucket(_))
        ));
    }

    #[test]
    fn test_rejects_empty_and_nested_names() {
        assert!(BucketUrl::parse("gs://").is_err());
        assert!(BucketUrl::parse("gs://bucket/images").is_err());
        assert!(BucketUrl::parse("gs://Upper").is_err());
    }
}
