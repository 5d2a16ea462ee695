//! Application services and ports.

#![forbid(unsafe_code)]

mod client_ports;
mod client_service;
mod lead_assignment_service;

pub use client_ports::{ClientRegistration, ClientRepository, Clock, RegisterClientInput};
pub use client_service::ClientService;
pub use lead_assignment_service::{AssignmentError, LeadAssignmentService};
