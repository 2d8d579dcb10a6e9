//! Gemini `generateContent` response types.
//!
//! Every field is optional: the API omits empty collections, and a record
//! may carry grounding kinds this crate does not know about. Only
//! [`crate::classify`] reads these types; callers see `mapx_core` types.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    pub parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
    /// Set on reasoning summaries, which are not part of the answer.
    pub thought: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    pub grounding_chunks: Option<Vec<GroundingChunk>>,
}

/// One raw grounding record. At most one of `maps` / `web` is expected.
#[derive(Debug, Default, Deserialize)]
pub struct GroundingChunk {
    pub maps: Option<MapsChunk>,
    pub web: Option<WebChunk>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapsChunk {
    pub uri: Option<String>,
    pub title: Option<String>,
    pub place_answer_sources: Option<PlaceAnswerSources>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebChunk {
    pub uri: Option<String>,
    pub title: Option<String>,
}

/// Sub-sources backing a place, in either shape the API has used.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PlaceAnswerSources {
    /// `[{"title", "uri"}, ...]`
    List(Vec<SourceRef>),
    /// `{"reviewSnippets": [{"title", "googleMapsUri"}, ...]}`
    Snippets(ReviewSnippets),
}

#[derive(Debug, Default, Deserialize)]
pub struct SourceRef {
    pub title: Option<String>,
    pub uri: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSnippets {
    pub review_snippets: Option<Vec<ReviewSnippet>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSnippet {
    pub title: Option<String>,
    pub google_maps_uri: Option<String>,
    pub uri: Option<String>,
}
