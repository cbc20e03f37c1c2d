//! HTTP client for the presigning service.
//!
//! DESIGN
//! ======
//! The export pipeline talks to the service through the [`PresignApi`]
//! trait; tests substitute an in-memory double. The HTTP implementation is
//! tolerant about response shapes — it accepts any of the field spellings
//! backends have used for the upload and public URLs.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::{Value, json};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status: {0}")]
    Status(u16),
    #[error("presign response missing upload URL")]
    MissingUploadUrl,
}

/// A minted upload slot: where to PUT, and (optionally) where the object
/// will be readable afterwards.
#[derive(Debug, Clone)]
pub struct PresignedUpload {
    pub upload_url: String,
    pub public_url: Option<String>,
    pub file_name: String,
}

/// The presigning service surface the client depends on.
#[async_trait::async_trait]
pub trait PresignApi: Send + Sync {
    /// `POST /presigned` — mint an upload slot for one file.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or a
    /// response with no usable upload URL.
    async fn create_presigned(
        &self,
        file_name: &str,
        file_type: &str,
        group_id: &str,
        user_id: &str,
    ) -> Result<PresignedUpload, ApiError>;

    /// PUT the blob to a presigned URL with the matching `Content-Type`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or any non-2xx status.
    async fn upload(&self, upload_url: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), ApiError>;

    /// `GET /{user_id}/{group_id}` — most recent public URL for the pair.
    /// `Ok(None)` when the service has no record.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-404 error status.
    async fn public_url(&self, user_id: &str, group_id: &str) -> Result<Option<String>, ApiError>;

    /// `GET /` — liveness probe.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-2xx status.
    async fn ping(&self) -> Result<(), ApiError>;
}

// =============================================================================
// HTTP IMPLEMENTATION
// =============================================================================

/// Reqwest-backed [`PresignApi`] against one service base URL.
pub struct HttpPresignClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpPresignClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// First string under any of the given keys.
fn pick<'a>(data: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| data.get(*k).and_then(Value::as_str))
}

#[async_trait::async_trait]
impl PresignApi for HttpPresignClient {
    async fn create_presigned(
        &self,
        file_name: &str,
        file_type: &str,
        group_id: &str,
        user_id: &str,
    ) -> Result<PresignedUpload, ApiError> {
        let resp = self
            .http
            .post(format!("{}/presigned", self.base_url))
            .json(&json!({
                "fileName": file_name,
                "fileType": file_type,
                "group_id": group_id,
                "user_id": user_id,
            }))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status().as_u16()));
        }

        let data: Value = resp.json().await?;
        let upload_url = pick(&data, &["uploadUrl", "url", "presignedUrl"])
            .ok_or(ApiError::MissingUploadUrl)?
            .to_string();
        let public_url = pick(&data, &["publicUrl", "objectUrl", "public_url"]).map(str::to_string);
        let file_name = pick(&data, &["fileName"]).unwrap_or(file_name).to_string();

        Ok(PresignedUpload { upload_url, public_url, file_name })
    }

    async fn upload(&self, upload_url: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .put(upload_url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status().as_u16()));
        }
        Ok(())
    }

    async fn public_url(&self, user_id: &str, group_id: &str) -> Result<Option<String>, ApiError> {
        let resp = self
            .http
            .get(format!("{}/{user_id}/{group_id}", self.base_url))
            .send()
            .await?;
        if resp.status().as_u16() == 404 {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status().as_u16()));
        }
        let data: Value = resp.json().await?;
        Ok(pick(&data, &["publicUrl"]).map(str::to_string))
    }

    async fn ping(&self) -> Result<(), ApiError> {
        let resp = self.http.get(format!("{}/", self.base_url)).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status().as_u16()));
        }
        Ok(())
    }
}
