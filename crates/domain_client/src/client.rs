//! Client entity

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::ClientId;

/// An agency client and the policy they hold
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: Option<String>,
    /// Always ten digits
    pub phone: String,
    pub customer_id: Option<String>,
    pub vehicle_plate: Option<String>,
    pub company: Option<String>,
    pub insurance_category: Option<String>,
    pub insurance_type: Option<String>,
    pub business_type: Option<String>,
    pub premium: Decimal,
    pub premium_paid: Decimal,
    pub start_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Outstanding premium; derived, never stored
    pub fn balance(&self) -> Decimal {
        self.premium - self.premium_paid
    }

    /// Builds a client from validated fields
    pub fn from_draft(id: ClientId, draft: ClientDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            customer_id: draft.customer_id,
            vehicle_plate: draft.vehicle_plate,
            company: draft.company,
            insurance_category: draft.insurance_category,
            insurance_type: draft.insurance_type,
            business_type: draft.business_type,
            premium: draft.premium,
            premium_paid: draft.premium_paid,
            start_date: draft.start_date,
            expiry_date: draft.expiry_date,
            created_at,
        }
    }
}

/// Client fields that passed validation and are ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct ClientDraft {
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub customer_id: Option<String>,
    pub vehicle_plate: Option<String>,
    pub company: Option<String>,
    pub insurance_category: Option<String>,
    pub insurance_type: Option<String>,
    pub business_type: Option<String>,
    pub premium: Decimal,
    pub premium_paid: Decimal,
    pub start_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
}
