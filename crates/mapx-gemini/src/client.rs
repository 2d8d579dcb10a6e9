//! HTTP client for the Gemini `generateContent` REST endpoint.
//!
//! Wraps `reqwest` with Gemini-specific error handling and typed response
//! classification. A [`GeminiClient`] is bound to one credential and is
//! meant to be built per query via [`GeminiClient::from_credential`].

use mapx_core::{AppConfig, Coordinates, QueryResult};
use reqwest::{Client, Url};

use crate::classify::classify_response;
use crate::credential::Credential;
use crate::error::GeminiError;
use crate::request::{build_request, GenerateContentRequest};
use crate::response::GenerateContentResponse;

/// The single model every query targets.
pub const MODEL: &str = "gemini-2.5-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Endpoint settings shared by every per-query client.
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    endpoint: Url,
    user_agent: String,
}

impl GeminiSettings {
    /// # Errors
    ///
    /// Returns [`GeminiError::InvalidBaseUrl`] if `base_url` is not a valid
    /// URL.
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, GeminiError> {
        let invalid = |reason: String| GeminiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        // Exactly one trailing slash so `join` appends below the version
        // segment instead of replacing it.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        let endpoint = base
            .join(&format!("models/{MODEL}:generateContent"))
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            endpoint,
            user_agent: user_agent.to_owned(),
        })
    }

    /// # Errors
    ///
    /// Returns [`GeminiError::InvalidBaseUrl`] if `MAPX_GEMINI_BASE_URL` is
    /// not a valid URL.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, GeminiError> {
        Self::new(&config.gemini_base_url, &config.user_agent)
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

pub struct GeminiClient {
    client: Client,
    credential: Credential,
    endpoint: Url,
}

impl GeminiClient {
    /// Builds a client bound to `credential`.
    ///
    /// No request timeout is configured; a query runs until the API answers.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_credential(
        credential: Credential,
        settings: &GeminiSettings,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            credential,
            endpoint: settings.endpoint.clone(),
        })
    }

    /// Asks the model about `prompt` with Google Maps grounding enabled.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::Http`] on network failure.
    /// - [`GeminiError::Api`] on a non-2xx status.
    /// - [`GeminiError::MissingResponse`] if the body is not a JSON object.
    /// - [`GeminiError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn generate_grounded(
        &self,
        prompt: &str,
        location: Option<Coordinates>,
    ) -> Result<QueryResult, GeminiError> {
        let request = build_request(prompt, location);
        let body = self.post_json(&request).await?;
        let response = parse_response(body)?;
        Ok(classify_response(response))
    }

    /// Sends the request and parses the body as JSON, mapping non-2xx
    /// statuses to [`GeminiError::Api`].
    async fn post_json(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<serde_json::Value, GeminiError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, self.credential.expose())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = api_error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            });
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| GeminiError::Deserialize {
            context: format!("{MODEL}:generateContent"),
            source: e,
        })
    }
}

/// Pulls `error.message` out of a Google API error envelope.
fn api_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(serde_json::Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Rejects bodies with no response object before typed deserialization.
fn parse_response(body: serde_json::Value) -> Result<GenerateContentResponse, GeminiError> {
    if !body.is_object() {
        return Err(GeminiError::MissingResponse);
    }
    serde_json::from_value(body).map_err(|e| GeminiError::Deserialize {
        context: format!("{MODEL}:generateContent"),
        source: e,
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
