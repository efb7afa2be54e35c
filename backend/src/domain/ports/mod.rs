//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod list_repository;

#[cfg(test)]
pub use list_repository::MockListRepository;
pub use list_repository::{InMemoryListRepository, ListRepository, ListRepositoryError};
