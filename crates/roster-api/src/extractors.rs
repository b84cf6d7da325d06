//! Axum extractors for API handlers

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};
use roster_models::RecordParams;
use roster_services::{AttachmentUpload, RecordStore};
use tracing::debug;

use crate::error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

/// Multipart form carrying a record's fields and an optional `photo` part.
///
/// Unknown parts are ignored. A `photo` part with no filename and no
/// bytes (a form submitted without choosing a file) counts as no upload.
#[derive(Debug, Default)]
pub struct RecordForm {
    pub params: RecordParams,
    pub photo: Option<AttachmentUpload>,
}

#[async_trait]
impl<S> FromRequest<S> for RecordForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        let mut form = RecordForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if name == "photo" {
                let filename = field.file_name().unwrap_or_default().to_owned();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;

                if filename.is_empty() && data.is_empty() {
                    continue;
                }
                debug!(filename = %filename, size = data.len(), "Received photo upload");
                form.photo = Some(AttachmentUpload::new(filename, data));
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?;

            let params = &mut form.params;
            match name.as_str() {
                "name" => params.name = Some(value),
                "username" => params.username = Some(value),
                "email" => params.email = Some(value),
                "role" => params.role = Some(value),
                "status" => params.status = Some(value),
                "teams" => params.teams = Some(value),
                other => debug!(field = other, "Ignoring unknown form field"),
            }
        }

        Ok(form)
    }
}
