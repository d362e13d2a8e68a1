//! Client handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};

use core_kernel::ClientId;
use domain_client::ClientInput;

use crate::dto::clients::*;
use crate::dto::{ApiJson, MessageResponse};
use crate::error::ApiError;
use crate::events::MutationEvent;
use crate::AppState;

/// Parses a client id; ids that cannot exist are reported as unknown
pub(crate) fn parse_client_id(raw: &str) -> Result<ClientId, ApiError> {
    raw.parse::<ClientId>()
        .map_err(|_| ApiError::NotFound("Client not found".to_string()))
}

/// Lists clients, ranked by `q` when present
pub async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<ClientListQuery>,
) -> Result<Json<Vec<ClientResponse>>, ApiError> {
    let clients = state.clients.list_clients(query.q.as_deref()).await?;
    Ok(Json(clients.into_iter().map(ClientResponse::from).collect()))
}

/// Gets a client with its claim records
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ClientDetailQuery>,
) -> Result<Json<ClientDetailResponse>, ApiError> {
    let id = parse_client_id(&id)?;
    let detail = state.clients.client_detail(id, query.aggregate()).await?;
    Ok(Json(detail.into()))
}

/// Creates a client
pub async fn create_client(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ClientRequest>,
) -> Result<Json<ClientResponse>, ApiError> {
    let input = ClientInput::try_from(request)?;
    let client = state.clients.create_client(input).await?;
    state.events.publish(MutationEvent::ClientCreated(client.id));
    Ok(Json(client.into()))
}

/// Replaces a client's fields
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<ClientRequest>,
) -> Result<Json<ClientResponse>, ApiError> {
    let id = parse_client_id(&id)?;
    let input = ClientInput::try_from(request)?;
    let client = state.clients.update_client(id, input).await?;
    state.events.publish(MutationEvent::ClientUpdated(client.id));
    Ok(Json(client.into()))
}

/// Deletes a client and its records
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_client_id(&id)?;
    state.clients.delete_client(id).await?;
    state.events.publish(MutationEvent::ClientDeleted(id));
    Ok(Json(MessageResponse::new("Client deleted")))
}
