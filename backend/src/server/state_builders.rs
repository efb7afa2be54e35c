//! Builds the HTTP adapter state from server configuration.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use todo_lists::inbound::http::state::HttpState;
use todo_lists::outbound::persistence::DieselListRepository;

use super::ServerConfig;

/// PostgreSQL-backed lists when a pool is configured, the visitor's session
/// otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("storing lists in PostgreSQL");
            HttpState::shared(Arc::new(DieselListRepository::new(pool.clone())))
        }
        None => {
            info!("storing lists in server-side sessions");
            HttpState::session_backed()
        }
    };
    web::Data::new(state)
}
