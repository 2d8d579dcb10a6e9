use std::fmt;

use thiserror::Error;

/// Fixed prefix carried by every [`BackendError`] message.
pub const BACKEND_ERROR_PREFIX: &str = "Failed to get maps data";

/// The single failure type a grounding backend may return.
///
/// Backends wrap their own transport and decoding errors with
/// [`BackendError::wrap`]; the original error type never crosses the seam.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    /// Wraps an underlying cause as `Failed to get maps data: <cause>`.
    pub fn wrap(cause: impl fmt::Display) -> Self {
        Self {
            message: format!("{BACKEND_ERROR_PREFIX}: {cause}"),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Input rejected before any backend call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a query.")]
    EmptyPrompt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_prefixes_underlying_message() {
        let err = BackendError::wrap("timeout");
        assert_eq!(err.message(), "Failed to get maps data: timeout");
        assert_eq!(err.to_string(), err.message());
    }

    #[test]
    fn wrap_stringifies_structured_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset");
        let err = BackendError::wrap(&io);
        assert_eq!(err.message(), "Failed to get maps data: connection reset");
    }

    #[test]
    fn empty_prompt_message() {
        assert_eq!(ValidationError::EmptyPrompt.to_string(), "Please enter a query.");
    }
}
