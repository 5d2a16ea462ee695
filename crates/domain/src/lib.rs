//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod client;
mod working_hours;

pub use client::{Client, ClientId, ClientInput, assignment_order, validate_counters};
pub use working_hours::{
    ClockTimeError, TimePeriod, WindowSide, WorkingHours, WorkingHoursError, parse_time_period,
};
