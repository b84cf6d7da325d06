//! # roster-services
//!
//! The record store: the single in-memory collection of user records and
//! the create/update/delete flows that keep stored attachments in line with it.

pub mod seed;
pub mod store;

pub use seed::seed_records;
pub use store::{AttachmentUpload, RecordStore};
