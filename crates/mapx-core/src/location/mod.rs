//! One-shot device location acquisition.
//!
//! [`locate_once`] performs exactly one bounded read and publishes the
//! outcome through a `tokio::sync::watch` channel. Consumers read whatever
//! is currently known; a query issued while the read is still in flight
//! simply proceeds without coordinates.

mod geolocator;

use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;

use crate::types::Coordinates;

pub use geolocator::{DeviceGeolocator, FixedGeolocator, Geolocator, HttpGeolocator};

pub const UNSUPPORTED_MESSAGE: &str = "Geolocation is not supported in this environment.";

/// Lifecycle of the single location read for this session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LocationStatus {
    #[default]
    Idle,
    Fetching,
    Granted,
    Denied,
    Error,
}

impl LocationStatus {
    /// Status line shown to the user, or `None` before acquisition starts.
    #[must_use]
    pub fn banner(self) -> Option<&'static str> {
        match self {
            LocationStatus::Idle => None,
            LocationStatus::Fetching => {
                Some("Fetching your location for more accurate results...")
            }
            LocationStatus::Granted => Some("Geolocation enabled for accurate local results."),
            LocationStatus::Denied => Some("Geolocation denied. Results might be less localized."),
            LocationStatus::Error => {
                Some("Geolocation error. Please ensure your environment supports it.")
            }
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            LocationStatus::Granted | LocationStatus::Denied | LocationStatus::Error
        )
    }
}

impl std::fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationStatus::Idle => write!(f, "idle"),
            LocationStatus::Fetching => write!(f, "fetching"),
            LocationStatus::Granted => write!(f, "granted"),
            LocationStatus::Denied => write!(f, "denied"),
            LocationStatus::Error => write!(f, "error"),
        }
    }
}

/// Options for the position read. Defaults match a fresh, high-accuracy
/// read with a 10 second bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Zero means a cached position is never acceptable.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_millis(10_000),
            maximum_age: Duration::ZERO,
        }
    }
}

impl PositionOptions {
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

/// Failure reported by a [`Geolocator`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("{0}")]
    PermissionDenied(String),

    #[error("{0}")]
    PositionUnavailable(String),

    #[error("Timeout expired")]
    Timeout,
}

/// The session's location snapshot.
///
/// Transitions are monotonic: `Idle -> Fetching -> {Granted | Denied}`, or
/// `Idle -> Error` when no geolocation capability exists. Once terminal the
/// state never changes again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationState {
    status: LocationStatus,
    coordinates: Option<Coordinates>,
    message: Option<String>,
}

impl LocationState {
    #[must_use]
    pub fn status(&self) -> LocationStatus {
        self.status
    }

    /// Coordinates to bias queries with; only ever `Some` once granted.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    /// Informational message for the denied and error outcomes.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns `false` and leaves the state untouched unless currently idle.
    pub fn begin_fetch(&mut self) -> bool {
        if self.status != LocationStatus::Idle {
            return false;
        }
        self.status = LocationStatus::Fetching;
        true
    }

    pub fn grant(&mut self, coordinates: Coordinates) -> bool {
        if self.status != LocationStatus::Fetching {
            return false;
        }
        self.status = LocationStatus::Granted;
        self.coordinates = Some(coordinates);
        true
    }

    pub fn deny(&mut self, err: &PositionError) -> bool {
        if self.status != LocationStatus::Fetching {
            return false;
        }
        self.status = LocationStatus::Denied;
        self.message = Some(format!(
            "Geolocation denied or unavailable: {err}. Results might be less accurate."
        ));
        true
    }

    /// Marks the capability as absent. Valid from `Idle` or `Fetching`.
    pub fn fail(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = LocationStatus::Error;
        self.message = Some(UNSUPPORTED_MESSAGE.to_string());
        true
    }
}

/// Creates the channel the location outcome is published on.
#[must_use]
pub fn channel() -> (watch::Sender<LocationState>, watch::Receiver<LocationState>) {
    watch::channel(LocationState::default())
}

/// Performs the session's single location read and publishes the result.
///
/// `None` means no geolocation capability is available at all. The read is
/// bounded by `options.timeout`; expiry counts as a denial. No retries.
pub async fn locate_once<G: Geolocator>(
    geolocator: Option<&G>,
    options: &PositionOptions,
    tx: &watch::Sender<LocationState>,
) -> LocationState {
    let Some(geolocator) = geolocator else {
        tracing::warn!("no geolocation capability configured; continuing without location");
        tx.send_if_modified(LocationState::fail);
        return tx.borrow().clone();
    };

    if !tx.send_if_modified(LocationState::begin_fetch) {
        tracing::debug!("location already acquired this session; skipping");
        return tx.borrow().clone();
    }

    let outcome = tokio::time::timeout(options.timeout, geolocator.current_position(options))
        .await
        .unwrap_or(Err(PositionError::Timeout));

    match outcome {
        Ok(coordinates) => {
            tracing::info!("location granted");
            tx.send_if_modified(|state| state.grant(coordinates));
        }
        Err(err) => {
            tracing::warn!(error = %err, "location denied or unavailable");
            tx.send_if_modified(|state| state.deny(&err));
        }
    }

    tx.borrow().clone()
}

#[cfg(test)]
#[path = "location_test.rs"]
mod tests;
