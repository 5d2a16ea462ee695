use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;
use leadroute_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::working_hours::{TimePeriod, WorkingHours, WorkingHoursError};

/// Registry-assigned client identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(i64);

impl ClientId {
    /// Creates a client identifier from a stored value.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for ClientId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Candidate recipient of leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    name: NonEmptyString,
    working_hours: String,
    priority: i32,
    lead_capacity: i32,
    existing_leads: i32,
}

/// Input payload used to construct a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInput {
    /// Registry-assigned identifier.
    pub id: ClientId,
    /// Display and dedup name.
    pub name: String,
    /// Raw `HH:MM-HH:MM` daily window.
    pub working_hours: String,
    /// Higher values are served first.
    pub priority: i32,
    /// Maximum number of open leads.
    pub lead_capacity: i32,
    /// Current number of open leads.
    pub existing_leads: i32,
}

impl Client {
    /// Creates a validated client.
    ///
    /// The working hours value is kept verbatim. It is checked when the
    /// client is registered and again whenever a lead is assigned.
    pub fn new(input: ClientInput) -> AppResult<Self> {
        let ClientInput {
            id,
            name,
            working_hours,
            priority,
            lead_capacity,
            existing_leads,
        } = input;

        validate_counters(lead_capacity, existing_leads)?;

        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            working_hours,
            priority,
            lead_capacity,
            existing_leads,
        })
    }

    /// Returns the client identifier.
    #[must_use]
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Returns the client name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the raw working hours value.
    #[must_use]
    pub fn working_hours(&self) -> &str {
        self.working_hours.as_str()
    }

    /// Returns the client priority.
    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns the maximum number of open leads.
    #[must_use]
    pub fn lead_capacity(&self) -> i32 {
        self.lead_capacity
    }

    /// Returns the current number of open leads.
    #[must_use]
    pub fn existing_leads(&self) -> i32 {
        self.existing_leads
    }

    /// Parses the stored working hours value.
    pub fn parse_working_hours(&self) -> Result<WorkingHours, WorkingHoursError> {
        WorkingHours::parse(&self.working_hours)
    }

    /// Returns whether the client can take one more lead.
    #[must_use]
    pub fn has_spare_capacity(&self) -> bool {
        self.existing_leads < self.lead_capacity
    }

    /// Returns whether the client can accept a lead at `now` within `period`.
    #[must_use]
    pub fn is_eligible(&self, period: &TimePeriod, now: NaiveDateTime) -> bool {
        period.contains(now) && self.has_spare_capacity()
    }

    /// Adds one open lead when capacity allows it.
    ///
    /// Returns `false` and leaves the client untouched when the client is
    /// already at capacity or when the load has reached `expected_capacity`.
    pub fn try_record_lead(&mut self, expected_capacity: i32) -> bool {
        if !self.has_spare_capacity() || self.existing_leads >= expected_capacity {
            return false;
        }

        self.existing_leads += 1;
        true
    }
}

/// Orders clients the way the assignment engine visits them.
///
/// Higher priority first, then fewer open leads, then lower id.
#[must_use]
pub fn assignment_order(left: &Client, right: &Client) -> Ordering {
    right
        .priority
        .cmp(&left.priority)
        .then_with(|| left.existing_leads.cmp(&right.existing_leads))
        .then_with(|| left.id.cmp(&right.id))
}

/// Validates capacity and load counters.
pub fn validate_counters(lead_capacity: i32, existing_leads: i32) -> AppResult<()> {
    if lead_capacity < 0 {
        return Err(AppError::Validation(
            "lead_capacity must not be negative".to_owned(),
        ));
    }

    if existing_leads < 0 {
        return Err(AppError::Validation(
            "existing_leads must not be negative".to_owned(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn client(id: i64, priority: i32, existing_leads: i32, lead_capacity: i32) -> Client {
        Client::new(ClientInput {
            id: ClientId::new(id),
            name: format!("client-{id}"),
            working_hours: "09:00-17:00".to_owned(),
            priority,
            lead_capacity,
            existing_leads,
        })
        .unwrap_or_else(|_| unreachable!())
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 14)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .unwrap_or_else(|| unreachable!())
    }

    #[test]
    fn blank_name_is_rejected() {
        let result = Client::new(ClientInput {
            id: ClientId::new(1),
            name: "  ".to_owned(),
            working_hours: "09:00-17:00".to_owned(),
            priority: 1,
            lead_capacity: 1,
            existing_leads: 0,
        });
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn negative_counters_are_rejected() {
        assert!(validate_counters(-1, 0).is_err());
        assert!(validate_counters(1, -1).is_err());
        assert!(validate_counters(0, 0).is_ok());
    }

    #[test]
    fn eligible_inside_window_with_spare_capacity() {
        let client = client(1, 1, 2, 3);
        let period = client
            .parse_working_hours()
            .unwrap_or_else(|_| unreachable!())
            .period_at(at(12, 0));

        assert!(client.is_eligible(&period, at(12, 0)));
    }

    #[test]
    fn ineligible_at_capacity() {
        let client = client(1, 1, 3, 3);
        let period = client
            .parse_working_hours()
            .unwrap_or_else(|_| unreachable!())
            .period_at(at(12, 0));

        assert!(!client.is_eligible(&period, at(12, 0)));
    }

    #[test]
    fn eligibility_bounds_are_half_open() {
        let client = client(1, 1, 0, 3);
        let period = client
            .parse_working_hours()
            .unwrap_or_else(|_| unreachable!())
            .period_at(at(12, 0));

        assert!(client.is_eligible(&period, at(9, 0)));
        assert!(!client.is_eligible(&period, at(17, 0)));
    }

    #[test]
    fn zero_capacity_client_is_never_eligible() {
        let client = client(1, 1, 0, 0);
        let period = client
            .parse_working_hours()
            .unwrap_or_else(|_| unreachable!())
            .period_at(at(12, 0));

        assert!(!client.is_eligible(&period, at(12, 0)));
    }

    #[test]
    fn try_record_lead_stops_at_capacity() {
        let mut client = client(1, 1, 0, 2);

        assert!(client.try_record_lead(2));
        assert!(client.try_record_lead(2));
        assert!(!client.try_record_lead(2));
        assert_eq!(client.existing_leads(), 2);
    }

    #[test]
    fn try_record_lead_honors_lower_expected_capacity() {
        let mut client = client(1, 1, 1, 5);

        assert!(!client.try_record_lead(1));
        assert_eq!(client.existing_leads(), 1);
    }

    #[test]
    fn assignment_order_prefers_priority_then_load_then_id() {
        let mut clients = vec![
            client(4, 2, 0, 5),
            client(3, 3, 1, 5),
            client(2, 3, 0, 5),
            client(1, 3, 1, 5),
        ];
        clients.sort_by(assignment_order);

        let ids: Vec<i64> = clients.iter().map(|client| client.id().as_i64()).collect();
        assert_eq!(ids, vec![2, 1, 3, 4]);
    }
}
