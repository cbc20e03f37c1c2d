//! Service configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! The presigning service is configured entirely through the environment
//! (`.env` is loaded at startup). Everything except the database URL and the
//! storage credentials has a typed default so a local instance boots with a
//! minimal `.env`.

use crate::services::storage::StorageConfig;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STORAGE_REGION: &str = "auto";
pub const DEFAULT_STORAGE_BUCKET: &str = "viewport";
pub const DEFAULT_UPLOAD_URL_EXPIRY_SECS: u64 = 60;
pub const DEFAULT_DOWNLOAD_URL_EXPIRY_SECS: u64 = 3600;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Exact origin allowed by CORS. `None` means permissive (local dev).
    pub cors_origin: Option<String>,
    pub storage: StorageConfig,
    /// Lifetime of signed PUT URLs, in seconds.
    pub upload_url_expiry_secs: u64,
    /// Lifetime of signed GET URLs, in seconds.
    pub download_url_expiry_secs: u64,
}

impl Config {
    /// Build typed service config from environment variables.
    ///
    /// Required:
    /// - `DATABASE_URL`
    /// - `STORAGE_ENDPOINT`
    /// - `STORAGE_ACCESS_KEY_ID`
    /// - `STORAGE_SECRET_ACCESS_KEY`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `CORS_ORIGIN`: exact allowed origin; permissive when absent
    /// - `STORAGE_REGION`: default `auto`
    /// - `STORAGE_BUCKET`: default `viewport`
    /// - `UPLOAD_URL_EXPIRY_SECS`: default 60
    /// - `DOWNLOAD_URL_EXPIRY_SECS`: default 3600
    ///
    /// # Errors
    ///
    /// Returns `MissingVar` if a required variable is absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = require("DATABASE_URL")?;
        let storage = StorageConfig {
            endpoint: require("STORAGE_ENDPOINT")?,
            region: std::env::var("STORAGE_REGION").unwrap_or_else(|_| DEFAULT_STORAGE_REGION.to_string()),
            bucket: std::env::var("STORAGE_BUCKET").unwrap_or_else(|_| DEFAULT_STORAGE_BUCKET.to_string()),
            access_key_id: require("STORAGE_ACCESS_KEY_ID")?,
            secret_access_key: require("STORAGE_SECRET_ACCESS_KEY")?,
        };

        Ok(Self {
            port: env_parse("PORT", DEFAULT_PORT),
            database_url,
            cors_origin: std::env::var("CORS_ORIGIN").ok().filter(|v| !v.is_empty()),
            storage,
            upload_url_expiry_secs: env_parse("UPLOAD_URL_EXPIRY_SECS", DEFAULT_UPLOAD_URL_EXPIRY_SECS),
            download_url_expiry_secs: env_parse("DOWNLOAD_URL_EXPIRY_SECS", DEFAULT_DOWNLOAD_URL_EXPIRY_SECS),
        })
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingVar(key))
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
