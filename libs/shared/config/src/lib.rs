use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub server_port: u16,
    /// Outbound queue depth per dashboard subscriber before it is dropped.
    pub subscriber_buffer_size: usize,
    /// Depth of the domain-event channel feeding the dashboard aggregator.
    pub event_channel_size: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            jwt_secret: env::var("HCMS_JWT_SECRET").unwrap_or_else(|_| {
                warn!("HCMS_JWT_SECRET not set, using empty value");
                String::new()
            }),
            server_port: env::var("HCMS_SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            subscriber_buffer_size: env::var("HCMS_SUBSCRIBER_BUFFER_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(64),
            event_channel_size: env::var("HCMS_EVENT_CHANNEL_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(256),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.jwt_secret.is_empty()
    }
}
