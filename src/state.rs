use crate::config::Settings;
use crate::errors::InvalidEndpoint;
use crate::submit::SubscribeClient;
use chrono_tz::Tz;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub client: SubscribeClient,
    /// Dates the page for visitors whose browser reported no zone.
    pub server_zone: Option<Tz>,
}

impl AppState {
    pub fn new(settings: Settings, server_zone: Option<Tz>) -> Result<Self, InvalidEndpoint> {
        let client = SubscribeClient::new(&settings.subscribe_api_url)?;
        Ok(Self {
            settings: Arc::new(settings),
            client,
            server_zone,
        })
    }
}
