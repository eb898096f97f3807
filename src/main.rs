//! SenseBait backend entry point.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use sensebait::adapters::http::{build_router, AppState};
use sensebait::adapters::sqlite;
use sensebait::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    let pool = sqlite::connect(&config.database).await?;
    sqlite::schema::apply(&pool).await?;

    let addr = config.server.socket_addr();
    let state = AppState::from_pool(Arc::new(config), pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "sensebait backend listening");
    axum::serve(listener, app).await?;

    Ok(())
}
