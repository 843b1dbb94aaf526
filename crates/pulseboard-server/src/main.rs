use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use pulseboard_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise structured JSON logging. Level controlled via RUST_LOG env var.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pulseboard=info".parse()?),
        )
        .json()
        .init();

    let cfg = pulseboard_core::config::Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Build the Data API client from the service-account key file. The key
    // is read once here; the client mints and refreshes tokens on demand.
    let reporting = pulseboard_ga::DataApiClient::from_key_file(
        &cfg.key_file,
        &cfg.property_id,
        cfg.request_timeout(),
    )?;

    let addr = format!("0.0.0.0:{}", cfg.port);
    let state = Arc::new(AppState::new(reporting, cfg.clone()));
    let app = pulseboard_server::app::build_app(Arc::clone(&state));

    info!(
        port = cfg.port,
        property_id = %cfg.property_id,
        "Pulseboard listening on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
