//! PostgreSQL access for repository integration tests.
//!
//! Tests read `HBNB_TEST_DATABASE_URL`. When it is unset they print a skip
//! marker and return early, so the suite still passes on machines without a
//! database server.

use hbnb::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use tokio::sync::OnceCell;

const DATABASE_URL_ENV: &str = "HBNB_TEST_DATABASE_URL";

static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Returns a migrated pool, or `None` when no test database is configured.
pub async fn test_pool() -> Option<DbPool> {
    let Ok(url) = std::env::var(DATABASE_URL_ENV) else {
        eprintln!("SKIP-TEST-DATABASE: {DATABASE_URL_ENV} is not set");
        return None;
    };
    MIGRATED
        .get_or_init(|| async {
            run_migrations(&url)
                .await
                .unwrap_or_else(|err| panic!("migrations failed: {err}"));
        })
        .await;
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(2))
        .await
        .unwrap_or_else(|err| panic!("pool setup failed: {err}"));
    Some(pool)
}

/// Email address unique to one test run.
pub fn unique_email(label: &str) -> String {
    format!("{label}-{}@example.com", uuid::Uuid::new_v4().simple())
}
