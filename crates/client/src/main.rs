//! Territory game client binary.
//!
//! Composition root that assembles the pieces the session runtime leaves to
//! its collaborators: environment configuration, logging, the websocket
//! transport, the debug-match bootstrap, and a decision policy. The runtime
//! crate owns everything between the wire and the session mirror.
use std::time::Duration;

use anyhow::Result;

use runtime::SessionDriver;

mod config;
mod harness;
mod policy;
mod ws;

use config::ClientConfig;
use policy::ExpanderPolicy;
use ws::WsTransport;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = ClientConfig::from_env();
    tracing::info!(
        game_id = %config.game_id,
        member_id = %config.member_id,
        "starting territory client"
    );

    if config.spawn_debug_match {
        harness::start_debug_match(&config).await?;
        // Give the lobby a moment to register the match before connecting.
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    let transport = WsTransport::connect(&config.connection_url()).await?;
    let driver = SessionDriver::new(transport, ExpanderPolicy);

    let report = driver.run().await?;
    match report.final_score {
        Some(score) => tracing::info!(%score, stage = %report.stage, "match finished"),
        None => tracing::info!(stage = %report.stage, "session closed without a final score"),
    }

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
