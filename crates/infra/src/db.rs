//! PostgreSQL pool and schema bootstrap.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::config::Settings;

/// Open the shared pool. Callers treat failure as fatal.
pub async fn connect(settings: &Settings) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.db_max_connections)
        .connect(&settings.database_url)
        .await?;
    info!(max_connections = settings.db_max_connections, "database pool ready");
    Ok(pool)
}

/// Apply the embedded migrations (creates `users` and `posts`).
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("database migrations applied");
    Ok(())
}
