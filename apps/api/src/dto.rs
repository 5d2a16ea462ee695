use leadroute_application::RegisterClientInput;
use leadroute_domain::Client;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub client_registry: &'static str,
}

/// Incoming payload for client registration.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-client-request.ts"
)]
pub struct CreateClientRequest {
    pub name: String,
    pub working_hours: String,
    pub priority: i32,
    pub lead_capacity: i32,
    #[serde(default)]
    #[ts(optional)]
    pub existing_leads: Option<i32>,
}

/// Identifier of a created or already registered client.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/client-id-response.ts"
)]
pub struct ClientIdResponse {
    pub id: i64,
}

/// API representation of a client.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/client-response.ts"
)]
pub struct ClientResponse {
    pub id: i64,
    pub name: String,
    pub working_hours: String,
    pub priority: i32,
    pub lead_capacity: i32,
    pub existing_leads: i32,
}

/// Query string for single client lookups.
#[derive(Debug, Deserialize)]
pub struct ClientLookupQuery {
    pub id: Option<String>,
}

/// Result of a successful lead assignment.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assign-lead-response.ts"
)]
pub struct AssignLeadResponse {
    pub client_id: i64,
}

impl From<CreateClientRequest> for RegisterClientInput {
    fn from(request: CreateClientRequest) -> Self {
        Self {
            name: request.name,
            working_hours: request.working_hours,
            priority: request.priority,
            lead_capacity: request.lead_capacity,
            existing_leads: request.existing_leads.unwrap_or_default(),
        }
    }
}

impl From<Client> for ClientResponse {
    fn from(client: Client) -> Self {
        Self {
            id: client.id().as_i64(),
            name: client.name().as_str().to_owned(),
            working_hours: client.working_hours().to_owned(),
            priority: client.priority(),
            lead_capacity: client.lead_capacity(),
            existing_leads: client.existing_leads(),
        }
    }
}
