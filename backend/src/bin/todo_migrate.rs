//! Apply pending database migrations for the todo list store.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig as _;
use todo_lists::outbound::persistence::run_pending_migrations;
use todo_lists::settings::AppSettings;

/// `todo-migrate` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "todo-migrate",
    about = "Apply pending PostgreSQL migrations for the todo list store",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to the server settings
    /// (`TODO_DATABASE_URL` or a config file).
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    // Flags belong to this tool; only environment and files feed the settings.
    let settings = AppSettings::load_from_iter([OsString::from("todo-migrate")])
        .map_err(|error| eyre!("failed to load settings: {error}"))?;
    let database_url = resolve_database_url(args.database_url, settings.database_url)?;
    let applied = run_pending_migrations(&database_url).wrap_err("failed to apply migrations")?;
    if applied.is_empty() {
        println!("schema is up to date");
    }
    for version in applied {
        println!("applied {version}");
    }
    Ok(())
}

/// The flag wins over the settings; blank values count as unset.
fn resolve_database_url(flag: Option<String>, configured: Option<String>) -> Result<String> {
    let present = |url: &String| !url.trim().is_empty();
    flag.filter(present)
        .or_else(|| configured.filter(present))
        .ok_or_else(|| eyre!("pass --database-url or set TODO_DATABASE_URL"))
}
