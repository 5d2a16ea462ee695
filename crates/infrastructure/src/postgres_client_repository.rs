//! PostgreSQL-backed client registry using the `clients` table.

use async_trait::async_trait;
use leadroute_application::{ClientRegistration, ClientRepository, RegisterClientInput};
use leadroute_core::{AppError, AppResult};
use leadroute_domain::{Client, ClientId, ClientInput};
use sqlx::PgPool;

/// PostgreSQL implementation of the client registry port.
#[derive(Clone)]
pub struct PostgresClientRepository {
    pool: PgPool,
}

impl PostgresClientRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_client_id_by_name(&self, name: &str) -> AppResult<Option<ClientId>> {
        let client_id = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id
            FROM clients
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to look up client name: {error}")))?;

        Ok(client_id.map(ClientId::new))
    }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn register_client(&self, input: RegisterClientInput) -> AppResult<ClientRegistration> {
        let inserted = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO clients (name, working_hours, priority, lead_capacity, existing_leads)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (name) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(input.name.as_str())
        .bind(input.working_hours.as_str())
        .bind(input.priority)
        .bind(input.lead_capacity)
        .bind(input.existing_leads)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to register client: {error}")))?;

        if let Some(client_id) = inserted {
            return Ok(ClientRegistration {
                client_id: ClientId::new(client_id),
                created: true,
            });
        }

        let client_id = self
            .find_client_id_by_name(input.name.as_str())
            .await?
            .ok_or_else(|| {
                AppError::Conflict(format!(
                    "client '{}' conflicted on insert but could not be read back",
                    input.name
                ))
            })?;

        Ok(ClientRegistration {
            client_id,
            created: false,
        })
    }

    async fn list_clients(&self) -> AppResult<Vec<Client>> {
        let rows = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT id, name, working_hours, priority, lead_capacity, existing_leads
            FROM clients
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list clients: {error}")))?;

        rows.into_iter().map(Client::try_from).collect()
    }

    async fn find_client(&self, client_id: ClientId) -> AppResult<Option<Client>> {
        let row = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT id, name, working_hours, priority, lead_capacity, existing_leads
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(client_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find client: {error}")))?;

        row.map(Client::try_from).transpose()
    }

    async fn list_clients_ordered_by_priority(&self) -> AppResult<Vec<Client>> {
        let rows = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT id, name, working_hours, priority, lead_capacity, existing_leads
            FROM clients
            ORDER BY priority DESC, existing_leads ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list clients for assignment: {error}"))
        })?;

        rows.into_iter().map(Client::try_from).collect()
    }

    async fn try_increment_lead(
        &self,
        client_id: ClientId,
        expected_capacity: i32,
    ) -> AppResult<bool> {
        // The guard is evaluated against the locked row, so concurrent
        // increments serialize on it and never overshoot the capacity.
        let result = sqlx::query(
            r#"
            UPDATE clients
            SET existing_leads = existing_leads + 1
            WHERE id = $1
              AND existing_leads < lead_capacity
              AND existing_leads < $2
            "#,
        )
        .bind(client_id.as_i64())
        .bind(expected_capacity)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to increment client lead count: {error}"))
        })?;

        Ok(result.rows_affected() == 1)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: i64,
    name: String,
    working_hours: String,
    priority: i32,
    lead_capacity: i32,
    existing_leads: i32,
}

impl TryFrom<ClientRow> for Client {
    type Error = AppError;

    fn try_from(row: ClientRow) -> AppResult<Self> {
        let id = row.id;
        Client::new(ClientInput {
            id: ClientId::new(id),
            name: row.name,
            working_hours: row.working_hours,
            priority: row.priority,
            lead_capacity: row.lead_capacity,
            existing_leads: row.existing_leads,
        })
        .map_err(|error| {
            AppError::Internal(format!("stored client '{id}' is invalid: {error}"))
        })
    }
}
