//! Team list decoding
//!
//! Clients send `teams` as a JSON array of strings inside a form field.

use roster_core::{RosterError, RosterResult};

/// Decode an encoded team list.
///
/// A missing field is rejected the same way as malformed text.
pub fn decode_teams(encoded: Option<&str>) -> RosterResult<Vec<String>> {
    let raw = encoded.ok_or_else(|| RosterError::invalid_input("teams", "field is required"))?;

    serde_json::from_str::<Vec<String>>(raw)
        .map_err(|e| RosterError::invalid_input("teams", e.to_string()))
}
