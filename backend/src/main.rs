//! Todo list server entry-point.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig as _;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use todo_lists::inbound::http::health::HealthState;
use todo_lists::inbound::http::session_config::{BuildMode, session_settings};
use todo_lists::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use todo_lists::settings::AppSettings;

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|error| io::Error::other(format!("failed to load settings: {error}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    let session = session_settings(
        &settings.session_toggles(),
        BuildMode::from_debug_assertions(),
    )
    .map_err(io::Error::other)?;
    info!(
        fingerprint = %session.key_fingerprint(),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let mut config = ServerConfig::new(session.key, session.cookie_secure, bind_addr);
    if let Some(pool_config) = settings.pool_config() {
        config = config.with_db_pool(connect(pool_config).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}

/// Migrate the schema, then open the pool.
async fn connect(pool_config: PoolConfig) -> io::Result<DbPool> {
    let database_url = pool_config.database_url().to_owned();
    let applied = web::block(move || run_pending_migrations(&database_url))
        .await
        .map_err(io::Error::other)?
        .map_err(io::Error::other)?;
    if !applied.is_empty() {
        info!(versions = ?applied, "database schema migrated");
    }
    DbPool::new(pool_config).await.map_err(io::Error::other)
}
