//! Core error types for Roster

use thiserror::Error;

use crate::types::Id;

/// Core error type for record operations
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Not found: {entity} with id={id}")]
    NotFound { entity: &'static str, id: Id },

    #[error("Invalid value for {field}: {message}")]
    InvalidInput { field: &'static str, message: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl RosterError {
    pub fn not_found(entity: &'static str, id: Id) -> Self {
        RosterError::NotFound { entity, id }
    }

    pub fn invalid_input(field: &'static str, message: impl Into<String>) -> Self {
        RosterError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        RosterError::Storage(message.into())
    }
}

/// HTTP status code mapping for errors
impl RosterError {
    pub fn status_code(&self) -> u16 {
        match self {
            RosterError::NotFound { .. } => 404,
            RosterError::InvalidInput { .. } => 400,
            RosterError::Storage(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RosterError::NotFound { .. } => "NotFound",
            RosterError::InvalidInput { .. } => "InvalidInput",
            RosterError::Storage(_) => "StorageError",
        }
    }
}

pub type RosterResult<T> = Result<T, RosterError>;
