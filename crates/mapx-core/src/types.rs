//! Domain types shared by the location provider, grounding backends, and
//! the renderer.
//!
//! [`GroundingCitation`] is the closed union every backend must classify its
//! raw records into. Nothing downstream of a backend ever sees an
//! unclassified record.

use serde::{Deserialize, Serialize};

/// A device position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Returns `true` when both components are finite and inside the WGS84 range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= 90.0
            && self.longitude.abs() <= 180.0
    }
}

/// One source backing a maps citation, e.g. a review of the place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceAnswerSource {
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapsCitation {
    pub uri: String,
    pub title: String,
    /// Per-place sub-citations in backend order. May be empty.
    pub place_answer_sources: Vec<PlaceAnswerSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebCitation {
    pub uri: String,
    pub title: String,
}

/// A classified grounding record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GroundingCitation {
    Maps(MapsCitation),
    Web(WebCitation),
}

impl GroundingCitation {
    #[must_use]
    pub fn uri(&self) -> &str {
        match self {
            GroundingCitation::Maps(maps) => &maps.uri,
            GroundingCitation::Web(web) => &web.uri,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            GroundingCitation::Maps(maps) => &maps.title,
            GroundingCitation::Web(web) => &web.title,
        }
    }
}

/// The outcome of one successful grounding query.
///
/// `citations` keeps the backend's relevance order and is never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub text: String,
    pub citations: Vec<GroundingCitation>,
}
