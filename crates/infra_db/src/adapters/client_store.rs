//! SQLite Client Adapter
//!
//! This module provides the database adapter for the client domain,
//! implementing the `ClientPort` trait on top of the client and record
//! repositories.
//!
//! # Overview
//!
//! The `SqliteClientAdapter` serves as the bridge between the domain layer's
//! port interface and the database layer. It:
//!
//! - Translates domain requests into repository operations
//! - Converts database row types back to domain models
//! - Handles error translation between database and port errors
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::SqliteClientAdapter;
//! use domain_client::ClientPort;
//! use std::sync::Arc;
//!
//! let port: Arc<dyn ClientPort> = Arc::new(SqliteClientAdapter::new(pool));
//! let clients = port.list_clients().await?;
//! ```

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, ClientId, DomainPort, HealthCheckResult, HealthCheckable, PortError, RecordId,
};
use domain_claims::{ClaimRecord, ClaimStatus, NewClaimRecord, RecordType};
use domain_client::{Client, ClientDraft, ClientPort};

use crate::error::DatabaseError;
use crate::repositories::{ClientRepository, ClientRow, RecordRepository, RecordRow};

const ADAPTER_ID: &str = "sqlite-client-adapter";

/// SQLite-backed implementation of the ClientPort trait
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants:
/// - `DatabaseError::NotFound` -> `PortError::NotFound`
/// - `DatabaseError::DuplicateEntry` -> `PortError::Conflict`
/// - Corrupt stored values -> `PortError::Transformation`
/// - Other errors -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct SqliteClientAdapter {
    clients: ClientRepository,
    records: RecordRepository,
}

impl SqliteClientAdapter {
    /// Creates a new adapter over the given pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            clients: ClientRepository::new(pool.clone()),
            records: RecordRepository::new(pool),
        }
    }

    /// Returns the client repository
    pub fn client_repository(&self) -> &ClientRepository {
        &self.clients
    }

    /// Returns the record repository
    pub fn record_repository(&self) -> &RecordRepository {
        &self.records
    }
}

impl DomainPort for SqliteClientAdapter {}

#[async_trait]
impl HealthCheckable for SqliteClientAdapter {
    /// Checks database connectivity with a `SELECT 1`
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();
        let result = self.clients.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(()) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl ClientPort for SqliteClientAdapter {
    #[instrument(skip(self))]
    async fn list_clients(&self) -> Result<Vec<Client>, PortError> {
        let rows = self.clients.list_by_name().await?;
        rows.into_iter().map(row_to_client).collect()
    }

    #[instrument(skip(self))]
    async fn list_by_expiry(&self) -> Result<Vec<Client>, PortError> {
        let rows = self.clients.list_by_expiry().await?;
        rows.into_iter().map(row_to_client).collect()
    }

    #[instrument(skip(self), fields(client_id = %id))]
    async fn get_client(&self, id: ClientId) -> Result<Client, PortError> {
        let row = self.clients.get_by_id(&id.key()).await.map_err(|e| named(e, "Client", id))?;
        row_to_client(row)
    }

    #[instrument(skip(self, name, phone))]
    async fn find_by_identity(&self, name: &str, phone: &str) -> Result<Vec<Client>, PortError> {
        let rows = self.clients.find_by_identity(name, phone).await?;
        rows.into_iter().map(row_to_client).collect()
    }

    #[instrument(skip(self, draft))]
    async fn create_client(&self, draft: ClientDraft) -> Result<Client, PortError> {
        let client = Client::from_draft(ClientId::new_v7(), draft, Utc::now());
        self.clients.insert(&client_to_row(&client)).await?;
        debug!(client_id = %client.id, "Inserted client");
        Ok(client)
    }

    #[instrument(skip(self, draft), fields(client_id = %id))]
    async fn update_client(&self, id: ClientId, draft: ClientDraft) -> Result<Client, PortError> {
        let existing = self.get_client(id).await?;
        let client = Client::from_draft(id, draft, existing.created_at);
        self.clients
            .update(&client_to_row(&client))
            .await
            .map_err(|e| named(e, "Client", id))?;
        Ok(client)
    }

    #[instrument(skip(self), fields(client_id = %id))]
    async fn delete_client(&self, id: ClientId) -> Result<u64, PortError> {
        let removed = self
            .clients
            .delete_with_records(&id.key())
            .await
            .map_err(|e| named(e, "Client", id))?;
        debug!(records_removed = removed, "Deleted client");
        Ok(removed)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn records_for_clients(&self, ids: &[ClientId]) -> Result<Vec<ClaimRecord>, PortError> {
        let keys: Vec<String> = ids.iter().map(ClientId::key).collect();
        let rows = self.records.for_clients(&keys).await?;
        rows.into_iter().map(row_to_record).collect()
    }

    #[instrument(skip(self, record), fields(client_id = %client_id))]
    async fn create_record(
        &self,
        client_id: ClientId,
        record: NewClaimRecord,
    ) -> Result<ClaimRecord, PortError> {
        if !self.clients.exists(&client_id.key()).await? {
            return Err(PortError::not_found("Client", client_id));
        }

        let stored = ClaimRecord {
            id: RecordId::new_v7(),
            client_id,
            claim_number: record.claim_number,
            claim_amount: record.claim_amount,
            claim_date: record.claim_date,
            status: record.status,
            record_type: record.record_type,
            description: record.description,
            created_at: Utc::now(),
        };

        // The client may vanish between the check and the insert
        self.records
            .insert(&record_to_row(&stored))
            .await
            .map_err(|e| match e {
                DatabaseError::ForeignKeyViolation(_) => PortError::not_found("Client", client_id),
                other => other.into(),
            })?;
        Ok(stored)
    }

    #[instrument(skip(self), fields(record_id = %id))]
    async fn delete_record(&self, id: RecordId) -> Result<(), PortError> {
        self.records
            .delete(&id.key())
            .await
            .map_err(|e| named(e, "Record", id))
    }
}

/// Replaces the storage key in a not-found error with the display identifier
fn named(error: DatabaseError, entity: &'static str, id: impl std::fmt::Display) -> PortError {
    if error.is_not_found() {
        PortError::not_found(entity, id)
    } else {
        error.into()
    }
}

fn parse_decimal(column: &'static str, raw: &str) -> Result<Decimal, PortError> {
    Decimal::from_str(raw).map_err(|e| DatabaseError::decode(column, e).into())
}

fn client_to_row(client: &Client) -> ClientRow {
    ClientRow {
        id: client.id.key(),
        name: client.name.clone(),
        email: client.email.clone(),
        phone: client.phone.clone(),
        customer_id: client.customer_id.clone(),
        vehicle_plate: client.vehicle_plate.clone(),
        company: client.company.clone(),
        insurance_category: client.insurance_category.clone(),
        insurance_type: client.insurance_type.clone(),
        business_type: client.business_type.clone(),
        premium: client.premium.to_string(),
        premium_paid: client.premium_paid.to_string(),
        start_date: client.start_date,
        expiry_date: client.expiry_date,
        created_at: client.created_at,
    }
}

fn row_to_client(row: ClientRow) -> Result<Client, PortError> {
    let id = ClientId::from_str(&row.id).map_err(|e| PortError::from(DatabaseError::decode("clients.id", e)))?;
    Ok(Client {
        id,
        premium: parse_decimal("clients.premium", &row.premium)?,
        premium_paid: parse_decimal("clients.premium_paid", &row.premium_paid)?,
        name: row.name,
        email: row.email,
        phone: row.phone,
        customer_id: row.customer_id,
        vehicle_plate: row.vehicle_plate,
        company: row.company,
        insurance_category: row.insurance_category,
        insurance_type: row.insurance_type,
        business_type: row.business_type,
        start_date: row.start_date,
        expiry_date: row.expiry_date,
        created_at: row.created_at,
    })
}

fn record_to_row(record: &ClaimRecord) -> RecordRow {
    RecordRow {
        id: record.id.key(),
        client_id: record.client_id.key(),
        claim_number: record.claim_number.clone(),
        claim_amount: record.claim_amount.to_string(),
        claim_date: record.claim_date,
        status: record.status.as_str().to_string(),
        record_type: record.record_type.as_str().to_string(),
        description: record.description.clone(),
        created_at: record.created_at,
    }
}

fn row_to_record(row: RecordRow) -> Result<ClaimRecord, PortError> {
    let decode = |column: &'static str, e: &dyn std::fmt::Display| -> PortError {
        DatabaseError::decode(column, e).into()
    };

    Ok(ClaimRecord {
        id: RecordId::from_str(&row.id).map_err(|e| decode("records.id", &e))?,
        client_id: ClientId::from_str(&row.client_id).map_err(|e| decode("records.client_id", &e))?,
        claim_amount: parse_decimal("records.claim_amount", &row.claim_amount)?,
        status: ClaimStatus::from_str(&row.status).map_err(|e| decode("records.status", &e))?,
        record_type: RecordType::from_str(&row.record_type).map_err(|e| decode("records.record_type", &e))?,
        claim_number: row.claim_number,
        claim_date: row.claim_date,
        description: row.description,
        created_at: row.created_at,
    })
}
