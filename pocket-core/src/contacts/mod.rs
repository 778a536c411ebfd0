//! Contact book model and the client abstraction over contact backends.

pub mod factory;
pub mod memory;
mod models;
pub mod repository;

pub use factory::{ApiConfig, ContactClientFactory, ContactClientRegistry};
pub use memory::{InMemoryContactClientFactory, InMemoryContactRepository};
pub use models::{Contact, ContactId, NewContact};
pub use repository::{ContactError, ContactRepository};
