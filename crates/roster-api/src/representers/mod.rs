//! JSON representers for API responses

pub mod record;

pub use record::RecordRepresentation;
