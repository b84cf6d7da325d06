//! Stored attachment retrieval

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use roster_attachments::AttachmentError;

use crate::error::{ApiError, ApiResult};
use crate::extractors::AppState;

/// Serve the raw bytes of a stored attachment
///
/// GET /uploads/:key
pub async fn serve_upload(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let attachments = state.store.attachments();
    let reference = attachments.reference_for(&key);

    let data = attachments.resolve(&reference).await.map_err(|e| match e {
        AttachmentError::NotFound(_) | AttachmentError::InvalidReference(_) => {
            ApiError::not_found("Attachment", &key)
        }
        other => ApiError::internal(other.to_string()),
    })?;

    let content_type = attachments.content_type(&reference);
    Ok(([(header::CONTENT_TYPE, content_type)], data))
}
