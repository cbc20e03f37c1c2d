//! Storage signer — presigned PUT/GET URLs for the S3-compatible bucket.
//!
//! DESIGN
//! ======
//! Signing is sans-IO: `rusty-s3` computes SigV4 query parameters locally, so
//! no network call happens until the client actually PUTs or GETs the object.
//! The signer sits behind a trait so route handlers can be exercised with a
//! stub that never touches real credentials.

use std::time::Duration;

use rusty_s3::{Bucket, Credentials, S3Action, UrlStyle};
use url::Url;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid storage endpoint: {0}")]
    Endpoint(String),
    #[error("signing failed: {0}")]
    Sign(String),
}

/// Bucket coordinates and credentials, loaded from the environment.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Mints presigned URLs against the configured bucket.
pub trait StorageSigner: Send + Sync {
    /// Presigned URL authorizing a single PUT of `key` with the given
    /// `Content-Type`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Sign` if URL construction fails.
    fn presign_put(&self, key: &str, content_type: &str, expiry: Duration) -> Result<String, StorageError>;

    /// Presigned URL authorizing a single GET of `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Sign` if URL construction fails.
    fn presign_get(&self, key: &str, expiry: Duration) -> Result<String, StorageError>;
}

// =============================================================================
// S3 SIGNER
// =============================================================================

/// SigV4 signer for any S3-compatible endpoint (R2, MinIO, AWS).
#[derive(Debug)]
pub struct S3Signer {
    bucket: Bucket,
    credentials: Credentials,
}

impl S3Signer {
    /// Build a signer from bucket coordinates.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Endpoint` if the endpoint is not a valid URL.
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let endpoint: Url = config
            .endpoint
            .parse()
            .map_err(|e| StorageError::Endpoint(format!("{}: {e}", config.endpoint)))?;
        let bucket = Bucket::new(endpoint, UrlStyle::Path, config.bucket.clone(), config.region.clone())
            .map_err(|e| StorageError::Endpoint(e.to_string()))?;
        let credentials = Credentials::new(config.access_key_id.clone(), config.secret_access_key.clone());
        Ok(Self { bucket, credentials })
    }
}

impl StorageSigner for S3Signer {
    fn presign_put(&self, key: &str, content_type: &str, expiry: Duration) -> Result<String, StorageError> {
        let mut action = self.bucket.put_object(Some(&self.credentials), key);
        action.headers_mut().insert("content-type", content_type);
        Ok(action.sign(expiry).to_string())
    }

    fn presign_get(&self, key: &str, expiry: Duration) -> Result<String, StorageError> {
        let action = self.bucket.get_object(Some(&self.credentials), key);
        Ok(action.sign(expiry).to_string())
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
