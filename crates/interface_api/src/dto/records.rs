//! Claim record DTOs

use serde::Deserialize;
use serde_json::Value;

use domain_claims::ClaimRecordInput;

use crate::dto::lenient_decimal;
use crate::error::ApiError;

/// Add-record body
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRequest {
    pub claim_number: Option<String>,
    pub claim_amount: Option<Value>,
    pub claim_date: Option<String>,
    pub status: Option<String>,
    pub record_type: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<RecordRequest> for ClaimRecordInput {
    type Error = ApiError;

    fn try_from(request: RecordRequest) -> Result<Self, Self::Error> {
        Ok(ClaimRecordInput {
            claim_number: request.claim_number,
            claim_amount: lenient_decimal(request.claim_amount, "Claim amount")?,
            claim_date: request.claim_date,
            status: request.status,
            record_type: request.record_type,
            description: request.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_record_request_conversion() {
        let request: RecordRequest = serde_json::from_value(json!({
            "claimNumber": "CLM-1",
            "claimAmount": "2500.50",
            "claimDate": "2025-01-01",
            "recordType": "Renewal"
        }))
        .unwrap();
        let input = ClaimRecordInput::try_from(request).unwrap();

        assert_eq!(input.claim_amount, Some(dec!(2500.50)));
        assert_eq!(input.record_type.as_deref(), Some("Renewal"));
        assert_eq!(input.status, None);
    }
}
