//! PostgreSQL persistence for lists and todos.
//!
//! Diesel row structs and table definitions stay private to this module;
//! the adapter translates them into domain types at the boundary.

mod diesel_list_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_list_repository::DieselListRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
