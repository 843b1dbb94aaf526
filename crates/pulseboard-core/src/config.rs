use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Numeric GA4 property the dashboard reports on.
    pub property_id: String,
    /// Path to the Google service-account JSON key file.
    pub key_file: String,
    pub cors_origins: Vec<String>,
    /// Outbound request timeout for reporting backend calls, milliseconds.
    pub request_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            port: std::env::var("PULSEBOARD_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|e| format!("invalid port: {e}"))?,
            property_id: std::env::var("PULSEBOARD_GA_PROPERTY_ID")
                .map_err(|_| "PULSEBOARD_GA_PROPERTY_ID is required".to_string())?,
            key_file: std::env::var("PULSEBOARD_GA_KEY_FILE")
                .map_err(|_| "PULSEBOARD_GA_KEY_FILE is required".to_string())?,
            cors_origins: std::env::var("PULSEBOARD_CORS_ORIGINS")
                .map(|v| v.split(',').map(str::to_string).collect())
                .unwrap_or_default(),
            request_timeout_ms: std::env::var("PULSEBOARD_REQUEST_TIMEOUT_MS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .unwrap_or(10_000),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
