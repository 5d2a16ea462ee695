//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_client_repository;
mod postgres_client_repository;
mod system_clock;

pub use in_memory_client_repository::InMemoryClientRepository;
pub use postgres_client_repository::PostgresClientRepository;
pub use system_clock::SystemClock;
