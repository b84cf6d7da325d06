//! # roster-core
//!
//! Core types shared by every Roster crate:
//! - The `Id` primary key type
//! - The core error enum and its HTTP mapping
//! - Configuration loaded from the environment

pub mod config;
pub mod error;
pub mod types;

pub use error::*;
pub use types::*;
