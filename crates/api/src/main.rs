use std::sync::Arc;

use anyhow::Context;

use summer_api::app::{build_app, services::AppServices};
use summer_infra::{Settings, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the process environment still applies.
    let _ = dotenvy::dotenv();
    summer_observability::init();

    let settings = Settings::from_env().context("invalid configuration")?;

    let pool = db::connect(&settings)
        .await
        .context("failed to connect to the database")?;
    db::migrate(&pool)
        .await
        .context("failed to run database migrations")?;

    let services = Arc::new(AppServices::postgres(pool, &settings.jwt_secret));
    let app = build_app(services);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
