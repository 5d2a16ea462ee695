use std::sync::Arc;

use tracing::info;

use leadroute_core::{AppError, AppResult, NonEmptyString};
use leadroute_domain::{Client, ClientId, WorkingHours, validate_counters};

use crate::client_ports::{ClientRegistration, ClientRepository, RegisterClientInput};

/// Application service for client registry reads and registration.
#[derive(Clone)]
pub struct ClientService {
    repository: Arc<dyn ClientRepository>,
}

impl ClientService {
    /// Creates a client service.
    #[must_use]
    pub fn new(repository: Arc<dyn ClientRepository>) -> Self {
        Self { repository }
    }

    /// Registers a client, or returns the id of the client with the same name.
    pub async fn register_client(
        &self,
        input: RegisterClientInput,
    ) -> AppResult<ClientRegistration> {
        NonEmptyString::new(input.name.as_str())
            .map_err(|_| AppError::Validation("name must not be empty".to_owned()))?;
        WorkingHours::parse(&input.working_hours)
            .map_err(|error| AppError::Validation(format!("invalid working_hours: {error}")))?;
        validate_counters(input.lead_capacity, input.existing_leads)?;

        let registration = self.repository.register_client(input).await?;
        if registration.created {
            info!(client_id = %registration.client_id, "client registered");
        }

        Ok(registration)
    }

    /// Lists every client ordered by id.
    pub async fn list_clients(&self) -> AppResult<Vec<Client>> {
        self.repository.list_clients().await
    }

    /// Returns one client by id.
    pub async fn get_client(&self, client_id: ClientId) -> AppResult<Client> {
        self.repository
            .find_client(client_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("client '{client_id}' does not exist")))
    }
}
