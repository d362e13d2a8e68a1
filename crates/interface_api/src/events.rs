//! Mutation events
//!
//! Handlers publish an event after every successful write. The export worker
//! subscribes and starts one background upload per event, so a slow or
//! failing Drive never delays or fails the request that caused it.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use core_kernel::{ClientId, RecordId};

use crate::export::ExportService;

/// A completed write to the client book
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationEvent {
    ClientCreated(ClientId),
    ClientUpdated(ClientId),
    ClientDeleted(ClientId),
    RecordCreated { client_id: ClientId, record_id: RecordId },
    RecordDeleted(RecordId),
}

/// Sending half of the mutation channel
#[derive(Debug, Clone)]
pub struct EventPublisher {
    tx: Option<UnboundedSender<MutationEvent>>,
}

impl EventPublisher {
    /// Creates a publisher and the receiver a worker consumes
    pub fn channel() -> (Self, UnboundedReceiver<MutationEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// A publisher that drops every event
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Publishes an event; never fails
    pub fn publish(&self, event: MutationEvent) {
        let Some(tx) = &self.tx else {
            return;
        };
        if let Err(e) = tx.send(event) {
            debug!(event = ?e.0, "No export worker listening");
        }
    }
}

/// Spawns the worker that exports the client book after each mutation
pub fn spawn_export_worker(
    export: ExportService,
    mut events: UnboundedReceiver<MutationEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            let export = export.clone();
            tokio::spawn(async move {
                match export.export_now().await {
                    Ok(file) => info!(?event, file_id = %file.id, "Background export finished"),
                    Err(e) if e.is_precondition() => debug!(?event, error = %e, "Background export skipped"),
                    Err(e) => warn!(?event, error = %e, "Background export failed"),
                }
            });
        }
        debug!("Mutation channel closed, export worker stopping");
    })
}
