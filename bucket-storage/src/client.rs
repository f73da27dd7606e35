//! Firebase Storage REST client
//!
//! Talks to the `v0` JSON API:
//! - upload: `POST {api}/v0/b/{bucket}/o?name={key}` with the raw bytes
//! - metadata: `GET {api}/v0/b/{bucket}/o/{key}` (key as one encoded segment)
//! - media: `{api}/v0/b/{bucket}/o/{key}?alt=media&token={downloadToken}`

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response, StatusCode, Url};

use crate::bucket::BucketUrl;
use crate::error::{StorageError, StorageResult};
use crate::models::{ObjectMetadata, StorageConfig};
use crate::store::ObjectStore;

const USER_AGENT: &str = "PhotoBucket/0.1.0";

/// Client for one bucket. Build it once and share it.
#[derive(Debug, Clone)]
pub struct FirebaseStorage {
    http: reqwest::Client,
    config: StorageConfig,
}

impl FirebaseStorage {
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| StorageError::Other(format!("Client build failed: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn bucket(&self) -> &BucketUrl {
        &self.config.bucket
    }

    /// The underlying HTTP client, for sharing its connection pool
    pub fn http_client(&self) -> reqwest::Client {
        self.http.clone()
    }

    fn objects_url(&self) -> StorageResult<Url> {
        let mut url = Url::parse(&self.config.api_base)
            .map_err(|e| StorageError::InvalidUrl(format!("{}: {}", self.config.api_base, e)))?;
        url.path_segments_mut()
            .map_err(|_| StorageError::InvalidUrl(self.config.api_base.clone()))?
            .pop_if_empty()
            .extend(["v0", "b", self.config.bucket.name(), "o"]);
        Ok(url)
    }

    /// Object URL; the whole key is one segment, so `/` becomes `%2F`
    fn object_url(&self, key: &str) -> StorageResult<Url> {
        let mut url = self.objects_url()?;
        url.path_segments_mut()
            .map_err(|_| StorageError::InvalidUrl(self.config.api_base.clone()))?
            .push(key);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.auth_token {
            Some(token) => request.header(AUTHORIZATION, format!("Firebase {}", token)),
            None => request,
        }
    }

    /// Fetch the metadata of an object
    pub async fn metadata(&self, key: &str) -> StorageResult<ObjectMetadata> {
        let url = self.object_url(key)?;
        log::debug!("GET metadata {}", url);

        let response = self.authorize(self.http.get(url)).send().await?;
        let response = check_status(response, key).await?;
        Ok(response.json::<ObjectMetadata>().await?)
    }
}

impl ObjectStore for FirebaseStorage {
    async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<ObjectMetadata> {
        let mut url = self.objects_url()?;
        url.query_pairs_mut().append_pair("name", key);
        log::debug!("POST {} ({} bytes, {})", url, data.len(), content_type);

        let request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .body(data);
        let response = self.authorize(request).send().await?;
        let response = check_status(response, key).await?;
        Ok(response.json::<ObjectMetadata>().await?)
    }

    async fn download_url(&self, key: &str) -> StorageResult<String> {
        let metadata = self.metadata(key).await?;
        let token = metadata
            .first_download_token()
            .ok_or_else(|| StorageError::NoDownloadToken(key.to_string()))?;

        let mut url = self.object_url(key)?;
        url.query_pairs_mut()
            .append_pair("alt", "media")
            .append_pair("token", token);
        Ok(url.to_string())
    }
}

/// Map non-success statuses onto storage errors
pub(crate) async fn check_status(response: Response, subject: &str) -> StorageResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    match status {
        StatusCode::NOT_FOUND => Err(StorageError::NotFound(subject.to_string())),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StorageError::Unauthorized(
            format!("{} ({})", subject, status),
        )),
        _ => Err(StorageError::Http(format!(
            "{} returned {}: {}",
            subject,
            status,
            body.trim()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const KEY: &str = "images/temp_1663238456200.jpeg";

    fn storage_for(server: &mockito::ServerGuard) -> FirebaseStorage {
        let mut config = StorageConfig::new(BucketUrl::parse("gs://test-bucket").unwrap());
        config.api_base = server.url();
        FirebaseStorage::new(config).unwrap()
    }

    fn metadata_json(tokens: &str) -> String {
        format!(
            r#"{{"name":"{}","bucket":"test-bucket","contentType":"image/jpeg","size":"3","downloadTokens":"{}"}}"#,
            KEY, tokens
        )
    }

    #[tokio::test]
    async fn test_put_object_posts_bytes_under_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Regex(r"^/v0/b/test-bucket/o(\?.*)?$".to_string()))
            .match_query(Matcher::UrlEncoded("name".to_string(), KEY.to_string()))
            .match_header("content-type", "image/jpeg")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(metadata_json("tok"))
            .create_async()
            .await;

        let storage = storage_for(&server);
        let meta = storage
            .put_object(KEY, vec![1, 2, 3], "image/jpeg")
            .await
            .unwrap();

        assert_eq!(meta.name, KEY);
        assert_eq!(meta.size_bytes(), Some(3));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_put_object_forbidden() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", Matcher::Regex(r"^/v0/b/test-bucket/o".to_string()))
            .with_status(403)
            .with_body(r#"{"error":{"code":403,"message":"Permission denied."}}"#)
            .create_async()
            .await;

        let storage = storage_for(&server);
        let err = storage
            .put_object(KEY, vec![0], "image/jpeg")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_auth_token_is_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Regex(r"^/v0/b/test-bucket/o".to_string()))
            .match_header("authorization", "Firebase secret-token")
            .with_status(200)
            .with_body(metadata_json("tok"))
            .create_async()
            .await;

        let mut config = StorageConfig::new(BucketUrl::parse("gs://test-bucket").unwrap());
        config.api_base = server.url();
        config.auth_token = Some("secret-token".to_string());
        let storage = FirebaseStorage::new(config).unwrap();

        storage.put_object(KEY, vec![9], "image/png").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_download_url_uses_first_token() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "GET",
                Matcher::Regex(
                    r"^/v0/b/test-bucket/o/images(%2F|/)temp_1663238456200\.jpeg$".to_string(),
                ),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(metadata_json("abc123,def456"))
            .create_async()
            .await;

        let storage = storage_for(&server);
        let url = storage.download_url(KEY).await.unwrap();

        assert_eq!(
            url,
            format!(
                "{}/v0/b/test-bucket/o/images%2Ftemp_1663238456200.jpeg?alt=media&token=abc123",
                server.url()
            )
        );
    }

    #[tokio::test]
    async fn test_download_url_without_token() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Regex(r"^/v0/b/test-bucket/o/".to_string()))
            .with_status(200)
            .with_body(metadata_json(""))
            .create_async()
            .await;

        let storage = storage_for(&server);
        let err = storage.download_url(KEY).await.unwrap_err();
        assert!(matches!(err, StorageError::NoDownloadToken(k) if k == KEY));
    }

    #[tokio::test]
    async fn test_download_url_missing_object() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Regex(r"^/v0/b/test-bucket/o/".to_string()))
            .with_status(404)
            .with_body(r#"{"error":{"code":404,"message":"Not Found."}}"#)
            .create_async()
            .await;

        let storage = storage_for(&server);
        let err = storage.download_url(KEY).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_server_error_is_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Regex(r"^/v0/b/test-bucket/o/".to_string()))
            .with_status(503)
            .with_body("backend unavailable")
            .create_async()
            .await;

        let storage = storage_for(&server);
        match storage.metadata(KEY).await {
            Err(StorageError::Http(msg)) => assert!(msg.contains("backend unavailable")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
