//! Orchestration services for document analysis.
//!
//! Domain logic separated from presentation concerns. Services emit
//! progress events over channels so the CLI (or any other surface) can
//! track long-running batches without sharing mutable state.

mod analysis;
mod redaction;

use thiserror::Error;

pub use analysis::{AnalysisEvent, AnalysisOutput, AnalysisService};
pub use redaction::RedactionService;

use crate::ingest::{ExtractionError, ValidationError};
use crate::provider::ProviderError;

/// Fallback shown when a failure carries no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Analysis failed. Please try again.";

/// Orchestrator-level error taxonomy.
///
/// Configuration errors abort an operation before any file is touched.
/// Validation, extraction, and provider errors are fatal in single-document
/// mode and isolated per file in batch mode.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Provider unusable; blocks all analysis attempts.
    #[error("{0}")]
    NotConfigured(String),

    /// No documents were provided.
    #[error("No documents were provided for analysis.")]
    NoDocuments,

    /// Upload rejected before any request was built.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Text extraction failed.
    #[error("{0}")]
    Extraction(#[from] ExtractionError),

    /// The provider call failed.
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl AnalysisError {
    /// User-facing message, falling back to a generic one when the
    /// underlying error carries no message.
    pub fn user_message(&self) -> String {
        let message = match self {
            Self::Provider(e) => e.message().to_string(),
            other => other.to_string(),
        };
        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_passes_through() {
        let err = AnalysisError::Provider(ProviderError::Api("rate limited".to_string()));
        assert_eq!(err.user_message(), "rate limited");
    }

    #[test]
    fn test_user_message_generic_fallback() {
        let err = AnalysisError::Provider(ProviderError::Api(String::new()));
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_validation_message_preserved() {
        let err = AnalysisError::Validation(ValidationError::SizeExceeded);
        assert_eq!(err.user_message(), "File size must be less than 10MB.");
    }
}
