//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use core_kernel::ClientId;
use domain_claims::ClaimRecordInput;
use domain_client::{Client, ClientDraft, ClientInput, ClientValidator};

use crate::fixtures::{AmountFixtures, StringFixtures, TemporalFixtures};

/// Builder for client input as a caller would submit it
#[derive(Debug, Clone)]
pub struct TestClientInputBuilder {
    input: ClientInput,
}

impl Default for TestClientInputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClientInputBuilder {
    /// Creates a new builder with a valid name and phone and nothing else
    pub fn new() -> Self {
        Self {
            input: ClientInput {
                name: Some(StringFixtures::client_name().to_string()),
                phone: Some(StringFixtures::phone().to_string()),
                ..Default::default()
            },
        }
    }

    /// Creates a builder with every optional field populated
    pub fn complete() -> Self {
        Self::new()
            .with_email(StringFixtures::email())
            .with_vehicle_plate(StringFixtures::vehicle_plate())
            .with_company(StringFixtures::company())
            .with_premium(AmountFixtures::premium())
            .with_premium_paid(AmountFixtures::premium_paid())
            .with_start_date(TemporalFixtures::policy_start())
            .with_expiry_date(TemporalFixtures::policy_end())
    }

    /// Sets the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.input.name = Some(name.into());
        self
    }

    /// Sets the phone number as submitted
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.input.phone = Some(phone.into());
        self
    }

    /// Removes the phone number
    pub fn without_phone(mut self) -> Self {
        self.input.phone = None;
        self
    }

    /// Sets the email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.input.email = Some(email.into());
        self
    }

    /// Sets the vehicle plate
    pub fn with_vehicle_plate(mut self, plate: impl Into<String>) -> Self {
        self.input.vehicle_plate = Some(plate.into());
        self
    }

    /// Sets the insurer
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.input.company = Some(company.into());
        self
    }

    /// Sets the premium
    pub fn with_premium(mut self, premium: Decimal) -> Self {
        self.input.premium = Some(premium);
        self
    }

    /// Sets the amount paid
    pub fn with_premium_paid(mut self, paid: Decimal) -> Self {
        self.input.premium_paid = Some(paid);
        self
    }

    /// Sets the start date
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.input.start_date = Some(date.to_string());
        self
    }

    /// Sets the expiry date
    pub fn with_expiry_date(mut self, date: NaiveDate) -> Self {
        self.input.expiry_date = Some(date.to_string());
        self
    }

    /// Sets the expiry date from raw text, for parse-failure tests
    pub fn with_raw_expiry_date(mut self, raw: impl Into<String>) -> Self {
        self.input.expiry_date = Some(raw.into());
        self
    }

    /// Builds the input
    pub fn build(self) -> ClientInput {
        self.input
    }

    /// Builds a validated draft
    ///
    /// # Panics
    ///
    /// Panics if the configured input does not validate
    pub fn build_draft(self) -> ClientDraft {
        ClientValidator::validate(self.input).expect("builder input should validate")
    }

    /// Builds a stored-looking client with a fresh ID
    pub fn build_client(self) -> Client {
        Client::from_draft(ClientId::new_v7(), self.build_draft(), Utc::now())
    }

    /// Builds the camelCase JSON body an HTTP caller would send
    pub fn build_json(self) -> Value {
        let i = self.input;
        json!({
            "name": i.name,
            "email": i.email,
            "phone": i.phone,
            "customerId": i.customer_id,
            "vehiclePlate": i.vehicle_plate,
            "company": i.company,
            "insuranceCategory": i.insurance_category,
            "insuranceType": i.insurance_type,
            "businessType": i.business_type,
            "premium": i.premium.map(|d| d.to_string()),
            "premiumPaid": i.premium_paid.map(|d| d.to_string()),
            "startDate": i.start_date,
            "expiryDate": i.expiry_date,
        })
    }
}

/// Builder for claim record input
#[derive(Debug, Clone)]
pub struct TestClaimInputBuilder {
    input: ClaimRecordInput,
}

impl Default for TestClaimInputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClaimInputBuilder {
    /// Creates a new builder with a claim number and an annual record type
    pub fn new() -> Self {
        Self {
            input: ClaimRecordInput {
                claim_number: Some(StringFixtures::claim_number().to_string()),
                claim_amount: Some(AmountFixtures::claim_amount()),
                record_type: Some("Annual".to_string()),
                ..Default::default()
            },
        }
    }

    /// Sets the claim number
    pub fn with_claim_number(mut self, number: impl Into<String>) -> Self {
        self.input.claim_number = Some(number.into());
        self
    }

    /// Sets the claim amount
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.input.claim_amount = Some(amount);
        self
    }

    /// Sets the claim date
    pub fn with_claim_date(mut self, date: NaiveDate) -> Self {
        self.input.claim_date = Some(date.to_string());
        self
    }

    /// Sets the status label
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.input.status = Some(status.into());
        self
    }

    /// Sets the record type label
    pub fn with_record_type(mut self, record_type: impl Into<String>) -> Self {
        self.input.record_type = Some(record_type.into());
        self
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.input.description = Some(description.into());
        self
    }

    /// Builds the input
    pub fn build(self) -> ClaimRecordInput {
        self.input
    }

    /// Builds the camelCase JSON body an HTTP caller would send
    pub fn build_json(self) -> Value {
        let i = self.input;
        json!({
            "claimNumber": i.claim_number,
            "claimAmount": i.claim_amount.map(|d| d.to_string()),
            "claimDate": i.claim_date,
            "status": i.status,
            "recordType": i.record_type,
            "description": i.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_input_validates() {
        let draft = TestClientInputBuilder::new().build_draft();
        assert_eq!(draft.phone, StringFixtures::phone());
    }

    #[test]
    fn test_complete_input_sets_dates() {
        let client = TestClientInputBuilder::complete().build_client();
        assert_eq!(client.expiry_date, Some(TemporalFixtures::policy_end()));
        assert_eq!(client.balance(), AmountFixtures::premium() - AmountFixtures::premium_paid());
    }

    #[test]
    fn test_claim_json_uses_camel_case() {
        let body = TestClaimInputBuilder::new().with_status("Approved").build_json();
        assert_eq!(body["recordType"], "Annual");
        assert_eq!(body["status"], "Approved");
    }
}
