//! Gemini `generateContent` client with Google Maps grounding.
//!
//! [`GeminiBackend`] is the [`mapx_core::GroundingBackend`] implementation:
//! it builds a fresh [`GeminiClient`] from the current credential on every
//! query and reports failures as [`mapx_core::BackendError`].

pub mod backend;
pub mod classify;
pub mod client;
pub mod credential;
pub mod error;
pub mod request;
pub mod response;

pub use backend::GeminiBackend;
pub use classify::{classify_chunk, classify_response};
pub use client::{GeminiClient, GeminiSettings, MODEL};
pub use credential::{Credential, CredentialSource, API_KEY_VARS};
pub use error::GeminiError;
pub use request::{build_request, GenerateContentRequest};
pub use response::GenerateContentResponse;
