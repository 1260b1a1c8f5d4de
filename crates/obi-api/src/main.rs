//! Service entry point.

use tracing_subscriber::EnvFilter;

use obi_api::config::AppConfig;
use obi_api::db::init_store;
use obi_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let store = init_store(&config).await?;
    let state = AppState::new(store, config.clone());

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, "obi-api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, obi_api::app(state)).await?;
    Ok(())
}
