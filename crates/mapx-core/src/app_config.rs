use crate::types::Coordinates;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings read once at startup.
///
/// The Gemini credential is intentionally absent: it is read from the
/// environment on every query so a rotated key applies to the next call.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub gemini_base_url: String,
    pub user_agent: String,
    /// Fixed device position from `MAPX_LATITUDE` / `MAPX_LONGITUDE`.
    pub fixed_location: Option<Coordinates>,
    pub geolocation_url: Option<String>,
    pub location_timeout_ms: u64,
}
