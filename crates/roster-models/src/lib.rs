//! # roster-models
//!
//! Domain models for Roster: the user record and the parameters used to
//! create or update one.

pub mod record;
pub mod teams;

pub use record::{RecordParams, UserRecord};
pub use teams::decode_teams;
