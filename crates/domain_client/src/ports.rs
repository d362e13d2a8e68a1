//! Client Domain Ports
//!
//! The `ClientPort` trait defines every operation the client domain needs
//! from its data source. The SQLite adapter in `infra_db` is the production
//! implementation; an in-memory mock is available for tests.
//!
//! ```rust,ignore
//! use domain_client::{ClientPort, ClientService};
//! use std::sync::Arc;
//!
//! let port: Arc<dyn ClientPort> = Arc::new(SqliteClientAdapter::new(pool));
//! let service = ClientService::new(port);
//! ```

use async_trait::async_trait;

use core_kernel::{ClientId, DomainPort, HealthCheckable, PortError, RecordId};
use domain_claims::{ClaimRecord, NewClaimRecord};

use crate::client::{Client, ClientDraft};

/// The port trait for client and claim record storage
#[async_trait]
pub trait ClientPort: DomainPort + HealthCheckable {
    // ========================================================================
    // Clients
    // ========================================================================

    /// Lists every client, alphabetically by name
    async fn list_clients(&self) -> Result<Vec<Client>, PortError>;

    /// Lists every client ordered by expiry date (absent dates first)
    async fn list_by_expiry(&self) -> Result<Vec<Client>, PortError>;

    /// Retrieves a client by ID
    ///
    /// # Returns
    ///
    /// The client if found, or `PortError::NotFound`
    async fn get_client(&self, id: ClientId) -> Result<Client, PortError>;

    /// Finds every client row sharing an identity, in creation order
    ///
    /// # Arguments
    ///
    /// * `name` - Compared case-insensitively
    /// * `phone` - Compared exactly
    async fn find_by_identity(&self, name: &str, phone: &str) -> Result<Vec<Client>, PortError>;

    /// Creates a new client with a generated ID
    async fn create_client(&self, draft: ClientDraft) -> Result<Client, PortError>;

    /// Replaces every editable field of an existing client
    async fn update_client(&self, id: ClientId, draft: ClientDraft) -> Result<Client, PortError>;

    /// Deletes a client together with all of its claim records
    ///
    /// Either both the records and the client are removed or nothing is.
    ///
    /// # Returns
    ///
    /// The number of claim records removed alongside the client
    async fn delete_client(&self, id: ClientId) -> Result<u64, PortError>;

    // ========================================================================
    // Claim records
    // ========================================================================

    /// Lists the claim records of the given clients, oldest claim date first
    async fn records_for_clients(&self, ids: &[ClientId]) -> Result<Vec<ClaimRecord>, PortError>;

    /// Adds a claim record to an existing client
    async fn create_record(
        &self,
        client_id: ClientId,
        record: NewClaimRecord,
    ) -> Result<ClaimRecord, PortError>;

    /// Deletes a single claim record
    async fn delete_record(&self, id: RecordId) -> Result<(), PortError>;
}

/// Mock implementation of ClientPort for testing
///
/// Stores clients and records in memory, preserving insertion order.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;
    use core_kernel::{AdapterHealth, HealthCheckResult};

    /// In-memory mock implementation of ClientPort
    #[derive(Debug, Default)]
    pub struct MockClientPort {
        clients: Arc<RwLock<Vec<Client>>>,
        records: Arc<RwLock<Vec<ClaimRecord>>>,
    }

    impl MockClientPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of stored records, for assertions
        pub async fn record_count(&self) -> usize {
            self.records.read().await.len()
        }
    }

    impl DomainPort for MockClientPort {}

    #[async_trait]
    impl HealthCheckable for MockClientPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-client-port".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ClientPort for MockClientPort {
        async fn list_clients(&self) -> Result<Vec<Client>, PortError> {
            let mut clients = self.clients.read().await.clone();
            clients.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            Ok(clients)
        }

        async fn list_by_expiry(&self) -> Result<Vec<Client>, PortError> {
            let mut clients = self.clients.read().await.clone();
            clients.sort_by_key(|c| c.expiry_date);
            Ok(clients)
        }

        async fn get_client(&self, id: ClientId) -> Result<Client, PortError> {
            self.clients
                .read()
                .await
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Client", id))
        }

        async fn find_by_identity(&self, name: &str, phone: &str) -> Result<Vec<Client>, PortError> {
            let name = name.to_lowercase();
            Ok(self
                .clients
                .read()
                .await
                .iter()
                .filter(|c| c.name.to_lowercase() == name && c.phone == phone)
                .cloned()
                .collect())
        }

        async fn create_client(&self, draft: ClientDraft) -> Result<Client, PortError> {
            let client = Client::from_draft(ClientId::new_v7(), draft, Utc::now());
            self.clients.write().await.push(client.clone());
            Ok(client)
        }

        async fn update_client(&self, id: ClientId, draft: ClientDraft) -> Result<Client, PortError> {
            let mut clients = self.clients.write().await;
            let slot = clients
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| PortError::not_found("Client", id))?;
            *slot = Client::from_draft(id, draft, slot.created_at);
            Ok(slot.clone())
        }

        async fn delete_client(&self, id: ClientId) -> Result<u64, PortError> {
            let mut clients = self.clients.write().await;
            let mut records = self.records.write().await;
            let before = clients.len();
            clients.retain(|c| c.id != id);
            if clients.len() == before {
                return Err(PortError::not_found("Client", id));
            }
            let record_count = records.len();
            records.retain(|r| r.client_id != id);
            Ok((record_count - records.len()) as u64)
        }

        async fn records_for_clients(&self, ids: &[ClientId]) -> Result<Vec<ClaimRecord>, PortError> {
            let mut records: Vec<ClaimRecord> = self
                .records
                .read()
                .await
                .iter()
                .filter(|r| ids.contains(&r.client_id))
                .cloned()
                .collect();
            records.sort_by_key(|r| r.claim_date);
            Ok(records)
        }

        async fn create_record(
            &self,
            client_id: ClientId,
            record: NewClaimRecord,
        ) -> Result<ClaimRecord, PortError> {
            if !self.clients.read().await.iter().any(|c| c.id == client_id) {
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
            self.records.write().await.push(stored.clone());
            Ok(stored)
        }

        async fn delete_record(&self, id: RecordId) -> Result<(), PortError> {
            let mut records = self.records.write().await;
            let before = records.len();
            records.retain(|r| r.id != id);
            if records.len() == before {
                return Err(PortError::not_found("Record", id));
            }
            Ok(())
        }
    }
}
