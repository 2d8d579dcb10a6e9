use std::future::Future;

use reqwest::{Client, StatusCode, Url};

use super::{PositionError, PositionOptions};
use crate::app_config::AppConfig;
use crate::types::Coordinates;
use crate::ConfigError;

/// A platform capability that can report the device position once.
pub trait Geolocator: Send + Sync {
    fn current_position(
        &self,
        options: &PositionOptions,
    ) -> impl Future<Output = Result<Coordinates, PositionError>> + Send;
}

/// Reports a position supplied up front (env vars or CLI flags).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedGeolocator {
    coordinates: Coordinates,
}

impl FixedGeolocator {
    #[must_use]
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

impl Geolocator for FixedGeolocator {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinates, PositionError> {
        Ok(self.coordinates)
    }
}

/// Looks the position up from an HTTP service returning
/// `{"latitude": f64, "longitude": f64}`.
#[derive(Debug, Clone)]
pub struct HttpGeolocator {
    client: Client,
    url: Url,
}

impl HttpGeolocator {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if `url` does not parse or the
    /// HTTP client cannot be built with `user_agent`.
    pub fn new(url: &str, user_agent: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(url).map_err(|e| ConfigError::InvalidEnvVar {
            var: "MAPX_GEOLOCATION_URL".to_string(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: "MAPX_USER_AGENT".to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { client, url })
    }
}

impl Geolocator for HttpGeolocator {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, PositionError> {
        let mut request = self.client.get(self.url.clone());
        if options.maximum_age.is_zero() {
            request = request.header(reqwest::header::CACHE_CONTROL, "no-cache");
        }

        let response = request.send().await.map_err(|e| {
            PositionError::PositionUnavailable(format!("geolocation request failed: {e}"))
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(PositionError::PermissionDenied(format!(
                "geolocation service refused the request ({status})"
            )));
        }
        if !status.is_success() {
            return Err(PositionError::PositionUnavailable(format!(
                "geolocation service returned status {status}"
            )));
        }

        let coordinates: Coordinates = response.json().await.map_err(|e| {
            PositionError::PositionUnavailable(format!("geolocation response parse error: {e}"))
        })?;

        if !coordinates.is_valid() {
            return Err(PositionError::PositionUnavailable(
                "geolocation service returned out-of-range coordinates".to_string(),
            ));
        }

        Ok(coordinates)
    }
}

/// The geolocation capability configured for this process.
#[derive(Debug, Clone)]
pub enum DeviceGeolocator {
    Fixed(FixedGeolocator),
    Http(HttpGeolocator),
}

impl DeviceGeolocator {
    /// Picks the configured capability: a fixed position wins over the HTTP
    /// service. `Ok(None)` means no capability is available.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if the HTTP service URL or user
    /// agent is unusable.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, ConfigError> {
        if let Some(coordinates) = config.fixed_location {
            return Ok(Some(Self::Fixed(FixedGeolocator::new(coordinates))));
        }
        match config.geolocation_url.as_deref() {
            Some(url) => Ok(Some(Self::Http(HttpGeolocator::new(
                url,
                &config.user_agent,
            )?))),
            None => Ok(None),
        }
    }
}

impl Geolocator for DeviceGeolocator {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, PositionError> {
        match self {
            DeviceGeolocator::Fixed(fixed) => fixed.current_position(options).await,
            DeviceGeolocator::Http(http) => http.current_position(options).await,
        }
    }
}
