//! API request handlers

pub mod records;
pub mod uploads;

pub use records::*;
pub use uploads::*;
