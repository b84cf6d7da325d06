//! # roster-api
//!
//! JSON and multipart HTTP handlers for the Roster record service.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod representers;
pub mod routes;

pub use extractors::AppState;
pub use routes::router;
