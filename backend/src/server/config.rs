//! Server settings loaded via OrthoConfig.
//!
//! Values come from `HBNB_*` environment variables, command-line flags or a
//! configuration file, with the defaults below.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5001;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Runtime configuration for the HTTP server and its store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HBNB")]
pub struct ServerSettings {
    /// Address to bind; defaults to all interfaces.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// PostgreSQL URL. When unset the in-memory store is used.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply embedded migrations on startup. Enabled unless set to `false`.
    pub run_migrations: Option<bool>,
}

impl ServerSettings {
    /// Host and port handed to `HttpServer::bind`.
    pub fn bind_addr(&self) -> (String, u16) {
        (
            self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }
}
