//! Client configuration loaded from the process environment.
use std::env;

/// Connection and match parameters for one client run.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Lobby HTTP endpoint hosting the debug bootstrap route.
    pub api_url: String,
    /// Websocket endpoint of the match server.
    pub ws_url: String,
    pub game_id: String,
    pub member_id: String,
    /// Whether to POST a debug match to the lobby before connecting.
    pub spawn_debug_match: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_owned(),
            ws_url: "ws://localhost:3001".to_owned(),
            game_id: "local_game".to_owned(),
            member_id: "mem1".to_owned(),
            spawn_debug_match: true,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TERRITORY_API_URL` - Lobby HTTP endpoint (default: http://localhost:3000)
    /// - `TERRITORY_WS_URL` - Match websocket endpoint (default: ws://localhost:3001)
    /// - `TERRITORY_GAME_ID` - Match identifier (default: local_game)
    /// - `TERRITORY_MEMBER_ID` - Player identifier (default: mem1)
    /// - `TERRITORY_SPAWN_DEBUG` - Start a debug match first (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("TERRITORY_API_URL") {
            config.api_url = url;
        }
        if let Ok(url) = env::var("TERRITORY_WS_URL") {
            config.ws_url = url;
        }
        if let Ok(game_id) = env::var("TERRITORY_GAME_ID") {
            config.game_id = game_id;
        }
        if let Ok(member_id) = env::var("TERRITORY_MEMBER_ID") {
            config.member_id = member_id;
        }
        if let Some(spawn) = read_env::<bool>("TERRITORY_SPAWN_DEBUG") {
            config.spawn_debug_match = spawn;
        }

        config
    }

    /// Connection URL carrying the match and member identity as the server
    /// expects them: query parameters on the websocket upgrade request.
    pub fn connection_url(&self) -> String {
        format!(
            "{}/?x-game-id={}&x-member-id={}",
            self.ws_url, self.game_id, self.member_id
        )
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_url_carries_identity() {
        let config = ClientConfig::default();
        assert_eq!(
            config.connection_url(),
            "ws://localhost:3001/?x-game-id=local_game&x-member-id=mem1"
        );
    }
}
