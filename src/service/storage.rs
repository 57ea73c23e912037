//! Storage upload client
//!
//! Pushes a raw blob to a bucket/path in the backend's object store.
//! The target is validated before any bytes leave the process.

use serde::{Deserialize, Serialize};

use crate::config::StanzaConfig;
use crate::error::StanzaError;

/// REST client for blob uploads
pub struct StorageApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// A validated upload: where the blob goes and what it is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub bucket: String,
    pub path: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadRequest {
    pub fn new(
        bucket: impl Into<String>,
        path: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, StanzaError> {
        let request = Self {
            bucket: bucket.into(),
            path: path.into(),
            content_type: content_type.into(),
            bytes,
        };
        request.validate()?;
        Ok(request)
    }

    /// Bucket and path must be non-empty relative names. `..` segments
    /// and absolute paths never reach the wire.
    fn validate(&self) -> Result<(), StanzaError> {
        if self.bucket.is_empty() {
            return Err(StanzaError::InvalidStorageTarget { detail: "empty bucket".into() });
        }
        if self.bucket.contains('/') {
            return Err(StanzaError::InvalidStorageTarget {
                detail: format!("bucket '{}' must not contain '/'", self.bucket),
            });
        }
        if self.path.is_empty() {
            return Err(StanzaError::InvalidStorageTarget { detail: "empty path".into() });
        }
        if self.path.starts_with('/') {
            return Err(StanzaError::InvalidStorageTarget {
                detail: format!("path '{}' must be relative", self.path),
            });
        }
        if self.path.split('/').any(|seg| seg == "..") {
            return Err(StanzaError::InvalidStorageTarget {
                detail: format!("path '{}' contains '..'", self.path),
            });
        }
        Ok(())
    }
}

/// Identifier returned by the object store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    #[serde(default, alias = "Id")]
    pub id: Option<String>,
    #[serde(default, alias = "Key")]
    pub key: Option<String>,
}

impl StorageApi {
    pub fn from_config(config: &StanzaConfig) -> Result<Self, StanzaError> {
        Ok(Self::with_parts(config.base_url_trimmed()?, config.api_key()?))
    }

    pub fn with_parts(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path)
    }

    /// Upload the blob, returning the stored object's identifier
    pub async fn upload(&self, request: UploadRequest) -> Result<StoredObject, StanzaError> {
        let url = self.endpoint(&request.bucket, &request.path);

        tracing::debug!(
            service = "storage",
            bucket = %request.bucket,
            path = %request.path,
            size = request.bytes.len(),
            "Uploading blob"
        );

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, &request.content_type)
            .body(request.bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(service = "storage", status, detail = %detail, "Upload failed");
            return Err(StanzaError::Api { status, detail });
        }

        let stored: StoredObject = response.json().await?;

        tracing::debug!(
            service = "storage",
            key = stored.key.as_deref().unwrap_or("(none)"),
            "Upload stored"
        );

        Ok(stored)
    }
}
