mod clock;
mod inputs;
mod repository;

pub use clock::Clock;
pub use inputs::{ClientRegistration, RegisterClientInput};
pub use repository::ClientRepository;
