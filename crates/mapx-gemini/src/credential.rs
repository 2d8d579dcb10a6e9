//! API credential lookup.
//!
//! The key is resolved through a [`CredentialSource`] at the start of every
//! query and handed to [`crate::GeminiClient::from_credential`]. Nothing
//! holds on to it between calls, so rotating the environment value takes
//! effect on the next query.

use std::fmt;
use std::sync::Arc;

use crate::error::GeminiError;

/// Environment variables checked for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([redacted])")
    }
}

type Lookup = dyn Fn() -> Option<String> + Send + Sync;

#[derive(Clone)]
pub struct CredentialSource {
    lookup: Arc<Lookup>,
}

impl CredentialSource {
    /// Reads [`API_KEY_VARS`] from the process environment on each call.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_fn(|| {
            API_KEY_VARS
                .iter()
                .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
        })
    }

    pub fn from_fn<F>(lookup: F) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        Self {
            lookup: Arc::new(lookup),
        }
    }

    pub fn fixed(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::from_fn(move || Some(key.clone()))
    }

    /// Resolves the credential as of now.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::MissingCredential`] if no non-blank key is available.
    pub fn current(&self) -> Result<Credential, GeminiError> {
        (self.lookup)()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .map(Credential)
            .ok_or(GeminiError::MissingCredential)
    }
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSource").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn debug_output_redacts_key() {
        let credential = CredentialSource::fixed("secret-key").current().unwrap();
        assert_eq!(format!("{credential:?}"), "Credential([redacted])");
    }

    #[test]
    fn blank_key_is_missing() {
        let source = CredentialSource::fixed("   ");
        assert!(matches!(source.current(), Err(GeminiError::MissingCredential)));
    }

    #[test]
    fn lookup_runs_on_every_call() {
        let key = Arc::new(Mutex::new("first".to_string()));
        let source = CredentialSource::from_fn({
            let key = Arc::clone(&key);
            move || Some(key.lock().unwrap().clone())
        });

        assert_eq!(source.current().unwrap().expose(), "first");
        *key.lock().unwrap() = "second".to_string();
        assert_eq!(source.current().unwrap().expose(), "second");
    }
}
