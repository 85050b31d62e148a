//! Error types for the cafe directory core

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::CafeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A required field was missing when creating a cafe
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A rating was submitted inside the cooldown window
    #[error(
        "Cafe {cafe_id} was already rated from this device; you can rate it again on {}",
        next_eligible.format("%B %-d, %Y")
    )]
    EligibilityDenied {
        cafe_id: CafeId,
        next_eligible: DateTime<Utc>,
    },

    /// A score outside its allowed range, or an otherwise malformed rating
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_denied_message_names_next_date() {
        let err = Error::EligibilityDenied {
            cafe_id: CafeId(3),
            next_eligible: Utc.with_ymd_and_hms(2024, 3, 8, 12, 0, 0).unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.contains("March 8, 2024"), "unexpected message: {msg}");
        assert!(msg.contains("Cafe 3"));
    }
}
