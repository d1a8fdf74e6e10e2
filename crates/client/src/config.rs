//! Client configuration loaded from environment variables.

/// API base URL used when `COUNTDOWN_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Where the client finds the countdown service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// HTTP base URL including the `/api` prefix, without a trailing slash.
    pub api_url: String,
    /// WebSocket URL of the change feed.
    pub ws_url: String,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var             | Default                         |
    /// |---------------------|---------------------------------|
    /// | `COUNTDOWN_API_URL` | `http://localhost:3000/api`     |
    /// | `COUNTDOWN_WS_URL`  | derived from the API URL        |
    pub fn from_env() -> Self {
        let api_url = std::env::var("COUNTDOWN_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let ws_url =
            std::env::var("COUNTDOWN_WS_URL").unwrap_or_else(|_| derive_ws_url(&api_url));

        Self { api_url, ws_url }
    }
}

/// Derive the change feed URL from the HTTP API base URL.
///
/// `http` becomes `ws`, `https` becomes `wss`, and `/ws` is appended.
pub fn derive_ws_url(api_url: &str) -> String {
    let base = api_url.trim_end_matches('/');
    let base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        base.to_string()
    };
    format!("{base}/ws")
}
