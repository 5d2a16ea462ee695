use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::AssignLeadResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn assign_lead_handler(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<AssignLeadResponse>)> {
    let client_id = state.lead_assignment_service.assign_lead().await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(AssignLeadResponse {
            client_id: client_id.as_i64(),
        }),
    ))
}
