//! User record handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use roster_core::Id;

use crate::error::ApiResult;
use crate::extractors::{AppState, RecordForm};
use crate::representers::RecordRepresentation;

/// List all users
///
/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<RecordRepresentation>> {
    let records = state.store.list_all().await;
    Json(records.into_iter().map(RecordRepresentation::from).collect())
}

/// Get a single user
///
/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<Json<RecordRepresentation>> {
    let record = state.store.get_by_id(id).await?;
    Ok(Json(record.into()))
}

/// Create a user from a multipart form
///
/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    form: RecordForm,
) -> ApiResult<Json<RecordRepresentation>> {
    let record = state.store.create(form.params, form.photo).await?;
    Ok(Json(record.into()))
}

/// Replace a user's fields, and photo if one is uploaded
///
/// PUT /api/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    form: RecordForm,
) -> ApiResult<Json<RecordRepresentation>> {
    let record = state.store.update(id, form.params, form.photo).await?;
    Ok(Json(record.into()))
}

/// Delete a user and their photo
///
/// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<StatusCode> {
    state.store.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
