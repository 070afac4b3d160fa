//! Debug match bootstrap.
//!
//! Local development runs against a lobby exposing a `/debug` route that
//! spins up a match immediately with the given members plus an observer
//! slot. Production match-making supplies the connection target out of band
//! instead.
use anyhow::{Context, Result};

use crate::config::ClientConfig;

pub async fn start_debug_match(config: &ClientConfig) -> Result<()> {
    let body = serde_json::json!({
        "gameId": config.game_id,
        "members": [
            {"memberId": config.member_id},
            {"memberId": "observer", "observer": true},
        ],
    });

    let url = format!("{}/debug", config.api_url);
    reqwest::Client::new()
        .post(&url)
        .json(&body)
        .send()
        .await
        .with_context(|| format!("failed to reach the lobby at {url}"))?
        .error_for_status()
        .context("lobby rejected the debug match request")?;

    tracing::info!(game_id = %config.game_id, "debug match started");
    Ok(())
}
