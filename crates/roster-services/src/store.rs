//! Record Store
//!
//! Holds every record behind one lock. Mutations that touch ids or
//! attachment references run inside a single write-lock scope.

use std::sync::Arc;

use bytes::Bytes;
use roster_attachments::AttachmentManager;
use roster_core::{max_id, Id, RosterError, RosterResult};
use roster_models::{decode_teams, RecordParams, UserRecord};
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::seed::seed_records;

const ENTITY: &str = "User";

/// An uploaded file waiting to be attached to a record
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    pub filename: String,
    pub data: Bytes,
}

impl AttachmentUpload {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// In-memory record store
pub struct RecordStore {
    records: RwLock<Vec<UserRecord>>,
    attachments: Arc<AttachmentManager>,
}

impl RecordStore {
    /// Create an empty store
    pub fn new(attachments: Arc<AttachmentManager>) -> Self {
        Self::with_records(attachments, Vec::new())
    }

    pub fn with_records(attachments: Arc<AttachmentManager>, records: Vec<UserRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            attachments,
        }
    }

    /// Create a store holding the startup records
    pub fn seeded(attachments: Arc<AttachmentManager>) -> Self {
        Self::with_records(attachments, seed_records())
    }

    pub fn attachments(&self) -> &AttachmentManager {
        &self.attachments
    }

    /// All records in insertion order
    pub async fn list_all(&self) -> Vec<UserRecord> {
        self.records.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn get_by_id(&self, id: Id) -> RosterResult<UserRecord> {
        let records = self.records.read().await;
        records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| RosterError::not_found(ENTITY, id))
    }

    /// Create a record, storing its photo first if one was uploaded
    #[instrument(skip(self, params, upload), fields(has_upload = upload.is_some()))]
    pub async fn create(
        &self,
        params: RecordParams,
        upload: Option<AttachmentUpload>,
    ) -> RosterResult<UserRecord> {
        let teams = decode_teams(params.teams.as_deref())?;

        let reference = match upload {
            Some(upload) => Some(self.attachments.store(upload.data, &upload.filename).await?),
            None => None,
        };

        let mut records = self.records.write().await;
        let id = next_id(&records);

        let mut record = UserRecord::new(id, params, teams);
        record.attachment_ref = reference;
        records.push(record.clone());

        info!(id = id, "Record created");
        Ok(record)
    }

    /// Overwrite a record's fields, replacing its photo if a new one was uploaded
    #[instrument(skip(self, params, upload), fields(has_upload = upload.is_some()))]
    pub async fn update(
        &self,
        id: Id,
        params: RecordParams,
        upload: Option<AttachmentUpload>,
    ) -> RosterResult<UserRecord> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RosterError::not_found(ENTITY, id))?;

        let teams = decode_teams(params.teams.as_deref())?;

        if let Some(upload) = upload {
            let reference = self.attachments.store(upload.data, &upload.filename).await?;
            if let Some(previous) = record.attachment_ref.replace(reference) {
                self.discard_attachment(&previous).await;
            }
        }

        record.apply(params, teams);

        info!(id = id, "Record updated");
        Ok(record.clone())
    }

    /// Remove a record and its stored photo
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: Id) -> RosterResult<()> {
        let removed = {
            let mut records = self.records.write().await;
            let index = records
                .iter()
                .position(|r| r.id == id)
                .ok_or_else(|| RosterError::not_found(ENTITY, id))?;
            records.remove(index)
        };

        if let Some(reference) = removed.attachment_ref {
            self.discard_attachment(&reference).await;
        }

        info!(id = id, "Record deleted");
        Ok(())
    }

    /// Best-effort removal: failures are logged and swallowed
    async fn discard_attachment(&self, reference: &str) {
        if let Err(e) = self.attachments.delete(reference).await {
            warn!(reference = %reference, error = %e, "Failed to delete attachment");
        }
    }
}

/// One past the highest live id, or 1 for an empty store
fn next_id(records: &[UserRecord]) -> Id {
    max_id(records).map_or(1, |max| max + 1)
}
