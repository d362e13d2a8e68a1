//! Claim record handlers

use axum::{
    extract::{Path, State},
    Json,
};

use core_kernel::RecordId;
use domain_claims::{ClaimRecord, ClaimRecordInput};

use crate::dto::records::RecordRequest;
use crate::dto::{ApiJson, MessageResponse};
use crate::error::ApiError;
use crate::events::MutationEvent;
use crate::handlers::clients::parse_client_id;
use crate::AppState;

/// Adds a claim record to a client
pub async fn add_record(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    ApiJson(request): ApiJson<RecordRequest>,
) -> Result<Json<ClaimRecord>, ApiError> {
    let client_id = parse_client_id(&client_id)?;
    let input = ClaimRecordInput::try_from(request)?;
    let record = state.clients.add_record(client_id, input, state.today()).await?;
    state.events.publish(MutationEvent::RecordCreated {
        client_id,
        record_id: record.id,
    });
    Ok(Json(record))
}

/// Deletes one claim record
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = id
        .parse::<RecordId>()
        .map_err(|_| ApiError::NotFound("Record not found".to_string()))?;
    state.clients.delete_record(id).await?;
    state.events.publish(MutationEvent::RecordDeleted(id));
    Ok(Json(MessageResponse::new("Record deleted")))
}
