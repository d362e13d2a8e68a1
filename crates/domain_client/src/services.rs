//! Client application service
//!
//! `ClientService` sits between the HTTP handlers and the `ClientPort`. It
//! validates input, builds the expiry report, and assembles client detail
//! views, including the aggregate view that merges duplicate client rows.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, instrument};

use core_kernel::{ClientId, RecordId};
use domain_claims::{ClaimRecord, ClaimRecordInput};

use crate::client::Client;
use crate::error::ClientError;
use crate::expiry::{expiry_report, ExpiringClient};
use crate::ports::ClientPort;
use crate::search::rank_clients;
use crate::validation::{ClientInput, ClientValidator};

/// A client together with its claim records
#[derive(Debug, Clone, Serialize)]
pub struct ClientDetail {
    #[serde(flatten)]
    pub client: Client,
    pub records: Vec<ClaimRecord>,
}

/// Service for client book operations
#[derive(Clone)]
pub struct ClientService {
    port: Arc<dyn ClientPort>,
}

impl ClientService {
    /// Creates a new service over the given port
    pub fn new(port: Arc<dyn ClientPort>) -> Self {
        Self { port }
    }

    /// Returns the underlying port
    pub fn port(&self) -> &Arc<dyn ClientPort> {
        &self.port
    }

    /// Lists clients, optionally filtered and ranked by a search query
    ///
    /// Without a query (or with a blank one) the store's alphabetical order
    /// is returned unchanged.
    pub async fn list_clients(&self, query: Option<&str>) -> Result<Vec<Client>, ClientError> {
        let clients = self.port.list_clients().await?;
        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => Ok(rank_clients(q, &clients).into_iter().cloned().collect()),
            None => Ok(clients),
        }
    }

    /// Builds the expiry report as of `today`
    #[instrument(skip(self))]
    pub async fn list_expiring(&self, today: NaiveDate) -> Result<Vec<ExpiringClient>, ClientError> {
        let clients = self.port.list_by_expiry().await?;
        Ok(expiry_report(clients, today))
    }

    /// Fetches a client with its claim records
    ///
    /// # Arguments
    ///
    /// * `id` - The client identifier
    /// * `aggregate` - When true, every row sharing the client's name
    ///   (case-insensitive) and phone contributes its records, and the first
    ///   such row in creation order is returned as the representative
    ///
    /// # Errors
    ///
    /// `PortError::NotFound` when no client has the given ID
    #[instrument(skip(self), fields(client_id = %id))]
    pub async fn client_detail(&self, id: ClientId, aggregate: bool) -> Result<ClientDetail, ClientError> {
        let client = self.port.get_client(id).await?;

        if !aggregate {
            let records = self.port.records_for_clients(&[id]).await?;
            return Ok(ClientDetail { client, records });
        }

        let matched = self.port.find_by_identity(&client.name, &client.phone).await?;
        let ids: Vec<ClientId> = matched.iter().map(|c| c.id).collect();
        let records = if ids.is_empty() {
            Vec::new()
        } else {
            self.port.records_for_clients(&ids).await?
        };
        debug!(rows = ids.len(), records = records.len(), "aggregated client detail");

        let representative = matched.into_iter().next().unwrap_or(client);
        Ok(ClientDetail {
            client: representative,
            records,
        })
    }

    /// Validates and creates a client
    #[instrument(skip(self, input))]
    pub async fn create_client(&self, input: ClientInput) -> Result<Client, ClientError> {
        let draft = ClientValidator::validate(input)?;
        let client = self.port.create_client(draft).await?;
        info!(client_id = %client.id, "client created");
        Ok(client)
    }

    /// Validates and updates a client
    #[instrument(skip(self, input), fields(client_id = %id))]
    pub async fn update_client(&self, id: ClientId, input: ClientInput) -> Result<Client, ClientError> {
        let draft = ClientValidator::validate(input)?;
        let client = self.port.update_client(id, draft).await?;
        info!("client updated");
        Ok(client)
    }

    /// Deletes a client and all of its records
    #[instrument(skip(self), fields(client_id = %id))]
    pub async fn delete_client(&self, id: ClientId) -> Result<u64, ClientError> {
        let removed = self.port.delete_client(id).await?;
        info!(records_removed = removed, "client deleted");
        Ok(removed)
    }

    /// Validates and adds a claim record to a client
    ///
    /// # Arguments
    ///
    /// * `today` - Claim date used when the input has none
    #[instrument(skip(self, input), fields(client_id = %client_id))]
    pub async fn add_record(
        &self,
        client_id: ClientId,
        input: ClaimRecordInput,
        today: NaiveDate,
    ) -> Result<ClaimRecord, ClientError> {
        let record = input.validate(today)?;
        let stored = self.port.create_record(client_id, record).await?;
        info!(record_id = %stored.id, "claim record added");
        Ok(stored)
    }

    /// Deletes one claim record
    #[instrument(skip(self), fields(record_id = %id))]
    pub async fn delete_record(&self, id: RecordId) -> Result<(), ClientError> {
        self.port.delete_record(id).await?;
        info!("claim record deleted");
        Ok(())
    }
}
