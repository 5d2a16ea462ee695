use std::collections::BTreeMap;

use async_trait::async_trait;
use leadroute_application::{ClientRegistration, ClientRepository, RegisterClientInput};
use leadroute_core::AppResult;
use leadroute_domain::{Client, ClientId, ClientInput, assignment_order};
use tokio::sync::RwLock;

/// In-memory client registry implementation.
///
/// Every write happens under one write lock, which makes the guarded lead
/// increment a single atomic step.
#[derive(Debug, Default)]
pub struct InMemoryClientRepository {
    clients: RwLock<BTreeMap<ClientId, Client>>,
}

impl InMemoryClientRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with the given clients.
    #[must_use]
    pub fn with_clients(clients: impl IntoIterator<Item = Client>) -> Self {
        Self {
            clients: RwLock::new(
                clients
                    .into_iter()
                    .map(|client| (client.id(), client))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn register_client(&self, input: RegisterClientInput) -> AppResult<ClientRegistration> {
        let mut clients = self.clients.write().await;

        if let Some(existing) = clients
            .values()
            .find(|client| client.name().as_str() == input.name)
        {
            return Ok(ClientRegistration {
                client_id: existing.id(),
                created: false,
            });
        }

        let client_id = ClientId::new(
            clients
                .keys()
                .next_back()
                .map_or(1, |last| last.as_i64() + 1),
        );
        let client = Client::new(ClientInput {
            id: client_id,
            name: input.name,
            working_hours: input.working_hours,
            priority: input.priority,
            lead_capacity: input.lead_capacity,
            existing_leads: input.existing_leads,
        })?;
        clients.insert(client_id, client);

        Ok(ClientRegistration {
            client_id,
            created: true,
        })
    }

    async fn list_clients(&self) -> AppResult<Vec<Client>> {
        Ok(self.clients.read().await.values().cloned().collect())
    }

    async fn find_client(&self, client_id: ClientId) -> AppResult<Option<Client>> {
        Ok(self.clients.read().await.get(&client_id).cloned())
    }

    async fn list_clients_ordered_by_priority(&self) -> AppResult<Vec<Client>> {
        let mut clients: Vec<Client> = self.clients.read().await.values().cloned().collect();
        clients.sort_by(assignment_order);
        Ok(clients)
    }

    async fn try_increment_lead(
        &self,
        client_id: ClientId,
        expected_capacity: i32,
    ) -> AppResult<bool> {
        Ok(self
            .clients
            .write()
            .await
            .get_mut(&client_id)
            .is_some_and(|client| client.try_record_lead(expected_capacity)))
    }
}
