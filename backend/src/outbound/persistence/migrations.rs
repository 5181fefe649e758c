//! Embedded schema migrations.
//!
//! Migrations are compiled into the binary and applied over a short-lived
//! synchronous connection, so startup never depends on the `diesel` CLI.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::RepositoryError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply every pending migration to the database at `url`.
///
/// The blocking connection runs on the Tokio blocking pool.
pub async fn run_migrations(url: &str) -> Result<(), RepositoryError> {
    let url = url.to_owned();
    tokio::task::spawn_blocking(move || migrate(&url))
        .await
        .map_err(|err| RepositoryError::query(format!("migration task: {err}")))?
}

fn migrate(url: &str) -> Result<(), RepositoryError> {
    let mut conn =
        PgConnection::establish(url).map_err(|err| RepositoryError::connection(err.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| RepositoryError::query(format!("migration: {err}")))?;
    info!(count = applied.len(), "applied pending migrations");
    Ok(())
}
