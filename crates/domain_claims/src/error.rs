//! Claims domain errors

use thiserror::Error;

/// Errors that can occur in the claims domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimError {
    #[error("Claim number is required")]
    MissingClaimNumber,

    #[error("Record type is required")]
    MissingRecordType,

    #[error("Invalid record type: {0}")]
    InvalidRecordType(String),

    #[error("Invalid claim status: {0}")]
    InvalidStatus(String),

    #[error("Invalid claim date: {0}")]
    InvalidDate(String),
}
