use mapx_core::{BackendError, Coordinates, GroundingBackend, QueryResult};

use crate::client::{GeminiClient, GeminiSettings};
use crate::credential::CredentialSource;
use crate::error::GeminiError;

/// [`GroundingBackend`] backed by the Gemini API.
///
/// Holds settings and a credential source, never a client: each query
/// resolves the credential and builds its own [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    settings: GeminiSettings,
    credentials: CredentialSource,
}

impl GeminiBackend {
    #[must_use]
    pub fn new(settings: GeminiSettings, credentials: CredentialSource) -> Self {
        Self {
            settings,
            credentials,
        }
    }

    async fn query_gemini(
        &self,
        prompt: &str,
        location: Option<Coordinates>,
    ) -> Result<QueryResult, GeminiError> {
        let credential = self.credentials.current()?;
        let client = GeminiClient::from_credential(credential, &self.settings)?;
        client.generate_grounded(prompt, location).await
    }
}

impl GroundingBackend for GeminiBackend {
    async fn query(
        &self,
        prompt: &str,
        location: Option<Coordinates>,
    ) -> Result<QueryResult, BackendError> {
        self.query_gemini(prompt, location).await.map_err(|e| {
            tracing::error!(error = %e, "error querying Gemini maps grounding");
            BackendError::wrap(e)
        })
    }
}
