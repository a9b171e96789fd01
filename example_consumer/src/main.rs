//! Server binary: builds the store once and serves the building API.
//!
//! Run from repo root: `cargo run -p example-consumer`
//! Or from this directory: `cargo run`

use building_api::{app, AppState, ServerConfig, Store};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("building_api=info,example_consumer=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let bind_addr = config.bind_addr();
    let state = AppState::new(Store::new(), config);

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        "building API listening on http://{}/{}",
        listener.local_addr()?,
        state.config.prefix
    );
    axum::serve(listener, app(state)).await?;
    Ok(())
}
