//! Claim record entity

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClientId, RecordId};
use core_kernel::temporal::parse_optional_date;
use crate::error::ClaimError;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ClaimStatus {
    /// Lodged, awaiting the insurer
    #[default]
    Pending,
    /// Accepted by the insurer
    Approved,
    /// Declined by the insurer
    Rejected,
    /// Being assessed
    #[serde(rename = "In Review")]
    InReview,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 4] = [
        ClaimStatus::Pending,
        ClaimStatus::Approved,
        ClaimStatus::Rejected,
        ClaimStatus::InReview,
    ];

    /// Returns the display label, which is also the stored value
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::InReview => "In Review",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match squash(s).as_str() {
            "pending" => Ok(ClaimStatus::Pending),
            "approved" => Ok(ClaimStatus::Approved),
            "rejected" => Ok(ClaimStatus::Rejected),
            "inreview" => Ok(ClaimStatus::InReview),
            _ => Err(ClaimError::InvalidStatus(s.to_string())),
        }
    }
}

/// Policy period a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    Annual,
    Renewal,
    Monthly,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Annual => "Annual",
            RecordType::Renewal => "Renewal",
            RecordType::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match squash(s).as_str() {
            "annual" => Ok(RecordType::Annual),
            "renewal" => Ok(RecordType::Renewal),
            "monthly" => Ok(RecordType::Monthly),
            _ => Err(ClaimError::InvalidRecordType(s.to_string())),
        }
    }
}

/// Lowercases and drops separators so "In Review", "in_review" and "IN-REVIEW" agree
fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// A persisted claim record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    pub id: RecordId,
    pub client_id: ClientId,
    pub claim_number: String,
    pub claim_amount: Decimal,
    pub claim_date: NaiveDate,
    pub status: ClaimStatus,
    pub record_type: RecordType,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Unvalidated claim fields as submitted by a caller
#[derive(Debug, Clone, Default)]
pub struct ClaimRecordInput {
    pub claim_number: Option<String>,
    pub claim_amount: Option<Decimal>,
    pub claim_date: Option<String>,
    pub status: Option<String>,
    pub record_type: Option<String>,
    pub description: Option<String>,
}

/// Claim fields that passed validation and are ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct NewClaimRecord {
    pub claim_number: String,
    pub claim_amount: Decimal,
    pub claim_date: NaiveDate,
    pub status: ClaimStatus,
    pub record_type: RecordType,
    pub description: Option<String>,
}

impl ClaimRecordInput {
    /// Validates the input, filling defaults
    ///
    /// # Arguments
    ///
    /// * `today` - Used as the claim date when none is supplied
    ///
    /// # Errors
    ///
    /// Missing claim number or record type, an unknown status or record type,
    /// or a malformed claim date.
    pub fn validate(self, today: NaiveDate) -> Result<NewClaimRecord, ClaimError> {
        let claim_number = non_blank(self.claim_number).ok_or(ClaimError::MissingClaimNumber)?;

        let record_type = non_blank(self.record_type)
            .ok_or(ClaimError::MissingRecordType)?
            .parse::<RecordType>()?;

        let status = match non_blank(self.status) {
            Some(raw) => raw.parse::<ClaimStatus>()?,
            None => ClaimStatus::default(),
        };

        let claim_date = parse_optional_date(self.claim_date.as_deref())
            .map_err(|e| ClaimError::InvalidDate(e.to_string()))?
            .unwrap_or(today);

        Ok(NewClaimRecord {
            claim_number,
            claim_amount: self.claim_amount.unwrap_or(Decimal::ZERO),
            claim_date,
            status,
            record_type,
            description: non_blank(self.description),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
