use leadroute_domain::ClientId;

/// Input payload for registering a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterClientInput {
    /// Client name, unique within the registry.
    pub name: String,
    /// Raw `HH:MM-HH:MM` daily window.
    pub working_hours: String,
    /// Higher values are served first.
    pub priority: i32,
    /// Maximum number of open leads.
    pub lead_capacity: i32,
    /// Initial number of open leads.
    pub existing_leads: i32,
}

/// Outcome of a register-or-return-existing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientRegistration {
    /// Identifier of the new or existing client.
    pub client_id: ClientId,
    /// Whether a new client row was inserted.
    pub created: bool,
}
