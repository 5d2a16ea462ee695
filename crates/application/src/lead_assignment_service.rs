//! Lead assignment engine.
//!
//! Picks one client for an incoming lead: the first client in assignment
//! order whose daily window is open and whose load is under capacity, and
//! commits the load increment through the registry's atomic guard.

use std::sync::Arc;

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::{debug, info, warn};

use leadroute_core::{AppError, AppResult};
use leadroute_domain::{Client, ClientId, WorkingHoursError, assignment_order};

use crate::client_ports::{ClientRepository, Clock};

/// Distinguishable failure outcomes of a lead assignment.
#[derive(Debug, Error)]
pub enum AssignmentError {
    /// A scanned client has a working hours value that cannot be parsed.
    #[error("client {client_id} has invalid working hours '{working_hours}': {source}")]
    InvalidWorkingHours {
        /// Client carrying the invalid value.
        client_id: ClientId,
        /// Raw stored working hours value.
        working_hours: String,
        /// Parse failure.
        #[source]
        source: WorkingHoursError,
    },

    /// No client is currently inside its window with spare capacity.
    #[error("no suitable client found")]
    NoEligibleClient,

    /// The client registry failed.
    #[error(transparent)]
    Registry(#[from] AppError),
}

/// Application service assigning leads to clients.
#[derive(Clone)]
pub struct LeadAssignmentService {
    repository: Arc<dyn ClientRepository>,
    clock: Arc<dyn Clock>,
}

impl LeadAssignmentService {
    /// Creates a lead assignment service.
    #[must_use]
    pub fn new(repository: Arc<dyn ClientRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Assigns one lead using the current time of the configured clock.
    pub async fn assign_lead(&self) -> Result<ClientId, AssignmentError> {
        let now = self.clock.now();
        self.assign_lead_at(now).await
    }

    /// Assigns one lead as of `now`.
    ///
    /// Scans one registry snapshot in assignment order. A client that loses
    /// the commit race is skipped and the scan moves on to the next
    /// candidate of the same snapshot.
    pub async fn assign_lead_at(&self, now: NaiveDateTime) -> Result<ClientId, AssignmentError> {
        let mut candidates = self.repository.list_clients_ordered_by_priority().await?;
        candidates.sort_by(assignment_order);

        for client in &candidates {
            let working_hours = client.parse_working_hours().map_err(|source| {
                warn!(
                    client_id = %client.id(),
                    working_hours = client.working_hours(),
                    error = %source,
                    "client has invalid working hours"
                );
                AssignmentError::InvalidWorkingHours {
                    client_id: client.id(),
                    working_hours: client.working_hours().to_owned(),
                    source,
                }
            })?;

            let period = working_hours.period_at(now);
            if !client.is_eligible(&period, now) {
                debug!(
                    client_id = %client.id(),
                    existing_leads = client.existing_leads(),
                    lead_capacity = client.lead_capacity(),
                    "client not eligible"
                );
                continue;
            }

            if self.commit_lead(client).await? {
                info!(
                    client_id = %client.id(),
                    priority = client.priority(),
                    "lead assigned"
                );
                return Ok(client.id());
            }

            warn!(
                client_id = %client.id(),
                "capacity consumed concurrently, trying next client"
            );
        }

        Err(AssignmentError::NoEligibleClient)
    }

    async fn commit_lead(&self, client: &Client) -> AppResult<bool> {
        self.repository
            .try_increment_lead(client.id(), client.lead_capacity())
            .await
    }
}
