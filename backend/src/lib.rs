//! Todo list manager: domain model, HTTP adapter and PostgreSQL storage.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use middleware::Trace;
