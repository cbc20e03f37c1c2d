//! Presign routes — upload URL minting and public-URL lookup.
//!
//! ERROR HANDLING
//! ==============
//! Validation failures surface as 400 with a descriptive `{"error": ...}`
//! body. Missing metadata rows are 404. Signing and database failures are
//! logged server-side and surface as an opaque 500; the client retries
//! nothing either way.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::services::upload::{self, UploadError, UploadRequest};
use crate::state::AppState;

// =============================================================================
// LIVENESS
// =============================================================================

/// `GET /` — liveness check.
pub async fn liveness() -> &'static str {
    "OK"
}

// =============================================================================
// PRESIGN
// =============================================================================

/// Body of `POST /presigned`. Fields default to empty so absence and
/// emptiness fail validation identically.
#[derive(Debug, Deserialize)]
pub struct PresignBody {
    #[serde(rename = "fileName", default)]
    pub file_name: String,
    #[serde(rename = "fileType", default)]
    pub file_type: String,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub user_id: String,
}

/// `POST /presigned` — validate, derive the storage key, mint a signed PUT
/// URL plus a signed GET URL, and record the upload row.
pub async fn create_presigned(
    State(state): State<AppState>,
    Json(body): Json<PresignBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let request = UploadRequest {
        file_name: body.file_name,
        file_type: body.file_type,
        group_id: body.group_id,
        user_id: body.user_id,
    };
    request.validate().map_err(upload_error_response)?;

    let key = upload::derive_key(&request.group_id, &request.file_name);
    let upload_url = state
        .signer
        .presign_put(&key, &request.file_type, state.upload_expiry)
        .map_err(|e| upload_error_response(e.into()))?;
    let public_url = state
        .signer
        .presign_get(&key, state.download_expiry)
        .map_err(|e| upload_error_response(e.into()))?;

    upload::record_upload(&state.pool, &request, &key)
        .await
        .map_err(upload_error_response)?;

    Ok(Json(json!({
        "success": true,
        "uploadUrl": upload_url,
        "publicUrl": public_url,
        "fileName": key,
        "message": "Upload URL generated successfully",
    })))
}

// =============================================================================
// LOOKUP
// =============================================================================

/// `GET /{user_id}/{group_id}` — resolve the most recent upload for the pair
/// and mint a signed GET URL for it.
pub async fn lookup(
    State(state): State<AppState>,
    Path((user_id, group_id)): Path<(String, String)>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let key = upload::latest_key(&state.pool, &user_id, &group_id)
        .await
        .map_err(upload_error_response)?;

    let Some(key) = key else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({"error": "No upload found for this user and group"})),
        ));
    };

    let public_url = state
        .signer
        .presign_get(&key, state.download_expiry)
        .map_err(|e| upload_error_response(e.into()))?;

    Ok(Json(json!({
        "success": true,
        "publicUrl": public_url,
        "group_id": group_id,
        "user_id": user_id,
        "fileName": key,
    })))
}

// =============================================================================
// ERROR MAPPING
// =============================================================================

pub(crate) fn upload_error_response(err: UploadError) -> (StatusCode, Json<Value>) {
    match err {
        UploadError::MissingFields | UploadError::NotAnImage => {
            (StatusCode::BAD_REQUEST, Json(json!({"error": err.to_string()})))
        }
        UploadError::Storage(e) => {
            tracing::error!(error = %e, "presign signing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to generate upload URL"})),
            )
        }
        UploadError::Database(e) => {
            tracing::error!(error = %e, "upload record query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to generate upload URL"})),
            )
        }
    }
}

#[cfg(test)]
#[path = "presign_test.rs"]
mod tests;
