use std::sync::Arc;

use leadroute_application::{ClientRepository, ClientService, Clock, LeadAssignmentService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub client_service: ClientService,
    pub lead_assignment_service: LeadAssignmentService,
    pub client_registry: &'static str,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn ClientRepository>,
        clock: Arc<dyn Clock>,
        client_registry: &'static str,
    ) -> Self {
        Self {
            client_service: ClientService::new(repository.clone()),
            lead_assignment_service: LeadAssignmentService::new(repository, clock),
            client_registry,
        }
    }
}
