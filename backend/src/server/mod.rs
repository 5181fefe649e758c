//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerSettings;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::NormalizePath;
use actix_web::{App, HttpServer, web};
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use hbnb::Trace;
#[cfg(debug_assertions)]
use hbnb::doc::ApiDoc;
use hbnb::inbound::http::configure;
use hbnb::inbound::http::health::{HealthState, live, ready};
use hbnb::inbound::http::state::HttpState;
use hbnb::outbound::persistence::{DbPool, PoolConfig, run_migrations};

/// Build handler state for the configured store.
///
/// With a database URL the schema is migrated (unless disabled) and a pool is
/// opened; without one the in-memory store is used.
pub async fn build_http_state(settings: &ServerSettings) -> Result<HttpState> {
    let Some(url) = settings.database_url.as_deref() else {
        return Ok(state_builders::memory_state());
    };
    if settings.run_migrations() {
        run_migrations(url)
            .await
            .wrap_err("failed to apply database migrations")?;
    }
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_max_size()))
        .await
        .wrap_err("failed to build database pool")?;
    Ok(state_builders::postgres_state(&pool))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(NormalizePath::trim())
        .wrap(Trace)
        .configure(configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the HTTP server and mark the service ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    bind_addr: (String, u16),
) -> std::io::Result<Server> {
    let http_state = web::Data::new(http_state);
    let server_health_state = health_state.clone();
    info!(host = %bind_addr.0, port = bind_addr.1, "binding HTTP server");
    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
