use async_trait::async_trait;
use leadroute_core::AppResult;
use leadroute_domain::{Client, ClientId};

use super::inputs::{ClientRegistration, RegisterClientInput};

/// Repository port for the client registry.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Inserts a client unless one with the same name already exists.
    ///
    /// The existence check and the insert must not race with a concurrent
    /// registration of the same name.
    async fn register_client(&self, input: RegisterClientInput) -> AppResult<ClientRegistration>;

    /// Lists every client ordered by id.
    async fn list_clients(&self) -> AppResult<Vec<Client>>;

    /// Returns one client by id.
    async fn find_client(&self, client_id: ClientId) -> AppResult<Option<Client>>;

    /// Lists a snapshot of every client ordered for lead assignment.
    ///
    /// Ordering is priority descending, then open leads ascending, then id.
    async fn list_clients_ordered_by_priority(&self) -> AppResult<Vec<Client>>;

    /// Adds one open lead to a client as a single atomic step.
    ///
    /// The increment only happens while the stored load is below both the
    /// stored capacity and `expected_capacity`. Returns `false` when the
    /// guard rejects the increment, including when the client no longer
    /// exists.
    async fn try_increment_lead(
        &self,
        client_id: ClientId,
        expected_capacity: i32,
    ) -> AppResult<bool>;
}
