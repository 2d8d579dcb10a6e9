//! Domain layer for the maps-grounded place search.
//!
//! Holds the closed citation model, the one-shot location provider, the
//! citation renderer, and the query controller state machine. Backends plug
//! in through [`GroundingBackend`].

pub mod app_config;
pub mod config;
pub mod controller;
pub mod error;
pub mod location;
pub mod render;
pub mod types;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use controller::{GroundingBackend, Phase, QueryController, QueryState, SubmitRejected};
pub use error::{BackendError, ValidationError, BACKEND_ERROR_PREFIX};
pub use location::{
    DeviceGeolocator, FixedGeolocator, Geolocator, HttpGeolocator, LocationState, LocationStatus,
    PositionError, PositionOptions,
};
pub use render::{render, RowKind, SourceRow};
pub use types::{
    Coordinates, GroundingCitation, MapsCitation, PlaceAnswerSource, QueryResult, WebCitation,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
