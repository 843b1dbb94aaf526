use std::sync::Arc;

use pulseboard_core::config::Config;
use pulseboard_core::report::ReportingBackend;

/// Shared application state injected into every Axum handler via
/// [`axum::extract::State`].
///
/// All fields are cheap to clone; heavy resources live behind `Arc`.
pub struct AppState {
    /// The reporting backend. A [`pulseboard_ga::DataApiClient`] in
    /// production; integration tests inject a fake so no request ever
    /// leaves the process.
    pub reporting: Arc<dyn ReportingBackend>,

    /// Parsed configuration, loaded once at startup from environment
    /// variables.
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(reporting: impl ReportingBackend, config: Config) -> Self {
        Self {
            reporting: Arc::new(reporting),
            config: Arc::new(config),
        }
    }
}
