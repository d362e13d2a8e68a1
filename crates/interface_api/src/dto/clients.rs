//! Client DTOs
//!
//! Request bodies come from a browser form, so numeric fields may arrive as
//! JSON numbers, numeric strings, or empty strings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use domain_claims::ClaimRecord;
use domain_client::{Client, ClientDetail, ClientInput, ExpiringClient, ExpiryStatus};

use crate::dto::{lenient_decimal, lenient_text};
use crate::error::ApiError;

/// Create/update client body
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Value>,
    #[serde(alias = "customerIdNo")]
    pub customer_id: Option<String>,
    #[serde(alias = "vehicleNumberPlate")]
    pub vehicle_plate: Option<String>,
    pub company: Option<String>,
    pub insurance_category: Option<String>,
    pub insurance_type: Option<String>,
    pub business_type: Option<String>,
    pub premium: Option<Value>,
    pub premium_paid: Option<Value>,
    pub start_date: Option<String>,
    pub expiry_date: Option<String>,
}

impl TryFrom<ClientRequest> for ClientInput {
    type Error = ApiError;

    fn try_from(request: ClientRequest) -> Result<Self, Self::Error> {
        Ok(ClientInput {
            name: request.name,
            email: request.email,
            phone: lenient_text(request.phone, "Phone")?,
            customer_id: request.customer_id,
            vehicle_plate: request.vehicle_plate,
            company: request.company,
            insurance_category: request.insurance_category,
            insurance_type: request.insurance_type,
            business_type: request.business_type,
            premium: lenient_decimal(request.premium, "Premium")?,
            premium_paid: lenient_decimal(request.premium_paid, "Premium paid")?,
            start_date: request.start_date,
            expiry_date: request.expiry_date,
        })
    }
}

/// Search parameters for the client list
#[derive(Debug, Default, Deserialize)]
pub struct ClientListQuery {
    pub q: Option<String>,
}

/// Detail parameters
#[derive(Debug, Default, Deserialize)]
pub struct ClientDetailQuery {
    #[serde(default)]
    pub aggregate: Option<String>,
}

impl ClientDetailQuery {
    /// Only the literal `true` enables aggregation
    pub fn aggregate(&self) -> bool {
        self.aggregate.as_deref() == Some("true")
    }
}

/// Client with its derived balance
#[derive(Debug, Clone, Serialize)]
pub struct ClientResponse {
    #[serde(flatten)]
    pub client: Client,
    pub balance: Decimal,
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        let balance = client.balance();
        Self { client, balance }
    }
}

/// Client detail with claim records
#[derive(Debug, Serialize)]
pub struct ClientDetailResponse {
    #[serde(flatten)]
    pub client: ClientResponse,
    pub records: Vec<ClaimRecord>,
}

impl From<ClientDetail> for ClientDetailResponse {
    fn from(detail: ClientDetail) -> Self {
        Self {
            client: detail.client.into(),
            records: detail.records,
        }
    }
}

/// Expiry report entry
#[derive(Debug, Serialize)]
pub struct ExpiryResponse {
    #[serde(flatten)]
    pub client: ClientResponse,
    #[serde(flatten)]
    pub status: ExpiryStatus,
}

impl From<ExpiringClient> for ExpiryResponse {
    fn from(entry: ExpiringClient) -> Self {
        Self {
            client: entry.client.into(),
            status: entry.status,
        }
    }
}
