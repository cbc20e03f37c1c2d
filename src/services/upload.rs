//! Upload service — request validation, key derivation, and metadata rows.
//!
//! DESIGN
//! ======
//! The storage key is derived from the group id plus the filename's
//! extension, so every upload for a given group with the same extension lands
//! on the same object key. The bucket holds one continually-overwritten
//! object per group; the `upload_records` table keeps one row per upload and
//! the lookup route resolves the most recent one.

use sqlx::PgPool;
use uuid::Uuid;

use super::storage::StorageError;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Missing required fields: fileName, fileType, group_id, or user_id")]
    MissingFields,
    #[error("Only image files are allowed")]
    NotAnImage,
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Validated upload metadata from a presign request.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_name: String,
    pub file_type: String,
    pub group_id: String,
    pub user_id: String,
}

impl UploadRequest {
    /// Validate field presence and the image MIME prefix.
    ///
    /// # Errors
    ///
    /// Returns `MissingFields` if any field is empty, `NotAnImage` if the
    /// content type is not `image/*`.
    pub fn validate(&self) -> Result<(), UploadError> {
        if self.file_name.is_empty()
            || self.file_type.is_empty()
            || self.group_id.is_empty()
            || self.user_id.is_empty()
        {
            return Err(UploadError::MissingFields);
        }
        if !self.file_type.starts_with("image/") {
            return Err(UploadError::NotAnImage);
        }
        Ok(())
    }
}

// =============================================================================
// KEY DERIVATION
// =============================================================================

/// Derive the storage key for an upload: `<group_id>.<ext>`.
///
/// The extension is everything after the last `.` in the filename; a filename
/// without a dot contributes itself wholesale. Filenames deliberately do not
/// otherwise participate, so uploads for one group collide on one key.
#[must_use]
pub fn derive_key(group_id: &str, file_name: &str) -> String {
    let ext = file_name.rsplit('.').next().unwrap_or(file_name);
    format!("{group_id}.{ext}")
}

// =============================================================================
// METADATA ROWS
// =============================================================================

/// Record one upload row. Rows are append-only; there is no update or delete
/// path.
///
/// # Errors
///
/// Returns `Database` on insert failure.
pub async fn record_upload(
    pool: &PgPool,
    request: &UploadRequest,
    object_key: &str,
) -> Result<(), UploadError> {
    sqlx::query(
        "INSERT INTO upload_records (id, group_id, user_id, object_key, content_type)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(Uuid::new_v4())
    .bind(&request.group_id)
    .bind(&request.user_id)
    .bind(object_key)
    .bind(&request.file_type)
    .execute(pool)
    .await?;
    Ok(())
}

/// Most recently recorded object key for a (user, group) pair, if any.
///
/// # Errors
///
/// Returns `Database` on query failure.
pub async fn latest_key(pool: &PgPool, user_id: &str, group_id: &str) -> Result<Option<String>, UploadError> {
    let key = sqlx::query_scalar::<_, Option<String>>(
        "SELECT object_key FROM upload_records
         WHERE user_id = $1 AND group_id = $2
         ORDER BY created_at DESC
         LIMIT 1",
    )
    .bind(user_id)
    .bind(group_id)
    .fetch_optional(pool)
    .await?;
    Ok(key.flatten())
}

#[cfg(test)]
#[path = "upload_test.rs"]
mod tests;
