use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use leadroute_core::AppError;
use leadroute_domain::ClientId;

use crate::dto::{ClientIdResponse, ClientLookupQuery, ClientResponse, CreateClientRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn create_client_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateClientRequest>,
) -> ApiResult<(StatusCode, Json<ClientIdResponse>)> {
    let registration = state.client_service.register_client(payload.into()).await?;
    let status = if registration.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(ClientIdResponse {
            id: registration.client_id.as_i64(),
        }),
    ))
}

pub async fn list_clients_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ClientResponse>>> {
    let clients = state
        .client_service
        .list_clients()
        .await?
        .into_iter()
        .map(ClientResponse::from)
        .collect();

    Ok(Json(clients))
}

pub async fn get_client_handler(
    State(state): State<AppState>,
    Query(query): Query<ClientLookupQuery>,
) -> ApiResult<Json<ClientResponse>> {
    let client_id = parse_client_id(query.id.as_deref())?;
    let client = state.client_service.get_client(client_id).await?;

    Ok(Json(ClientResponse::from(client)))
}

fn parse_client_id(value: Option<&str>) -> Result<ClientId, AppError> {
    let value = value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Validation("client id is missing".to_owned()))?;

    value
        .parse::<i64>()
        .map(ClientId::new)
        .map_err(|error| AppError::Validation(format!("invalid client id '{value}': {error}")))
}
