use std::{env, path::PathBuf};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SUBSCRIBE_API_URL: &str = "http://localhost:8081";

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    /// Base URL of the service that owns `api/subscribe`. A path prefix is
    /// kept: `http://host/app` posts to `http://host/app/api/subscribe`.
    pub subscribe_api_url: String,
    /// When set the page template is read from `<dir>/index.html` on every
    /// request instead of the embedded copy.
    pub asset_dir: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let subscribe_api_url = env::var("SUBSCRIBE_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SUBSCRIBE_API_URL.to_string());

        let asset_dir = env::var("APP_ASSET_DIR")
            .ok()
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Self {
            port,
            subscribe_api_url,
            asset_dir,
        }
    }
}
