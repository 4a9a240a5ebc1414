//! Redaction-impact analysis orchestration.
//!
//! A sibling of the comprehensive orchestrator specialized for documents
//! with intentionally hidden content. Single-document only: redaction
//! review is a one-document-at-a-time workflow, so there is no batch path.

use std::sync::Arc;

use tracing::info;

use super::AnalysisError;
use crate::ingest::{validate, TextExtractor, ValidationOutcome};
use crate::models::{
    ConfigurationStatus, RedactionAnalysisResult, RedactionRequest, UploadCandidate,
};
use crate::provider::AnalysisProvider;

/// Orchestrates redaction-impact analysis of a single document.
pub struct RedactionService {
    provider: Arc<dyn AnalysisProvider>,
    extractor: TextExtractor,
}

impl RedactionService {
    /// Create a new redaction service around a provider.
    pub fn new(provider: Arc<dyn AnalysisProvider>) -> Self {
        Self {
            provider,
            extractor: TextExtractor::new(),
        }
    }

    /// Override the text extractor.
    pub fn with_extractor(mut self, extractor: TextExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Probe the provider configuration. Not cached; each call re-probes.
    pub async fn configuration_status(&self) -> ConfigurationStatus {
        self.provider.configuration_status().await
    }

    /// Analyze a redacted document in the given jurisdiction.
    ///
    /// The full extracted text is forwarded unbudgeted: truncation would
    /// corrupt the provider's redaction-marker and integrity computation.
    pub async fn analyze_redacted(
        &self,
        candidate: &UploadCandidate,
        jurisdiction: &str,
    ) -> Result<RedactionAnalysisResult, AnalysisError> {
        self.ensure_configured().await?;

        if let ValidationOutcome::Rejected(reason) = validate(candidate) {
            return Err(reason.into());
        }

        let document = self.extractor.extract(candidate).await?;

        info!(
            "Analyzing redacted document: {} ({} chars, unbudgeted)",
            document.source_name,
            document.text.chars().count()
        );

        let request = RedactionRequest {
            content: document.text,
            jurisdiction: jurisdiction.to_string(),
            file_name: document.source_name,
            file_size: document.source_size,
            file_type: document.source_mime_type,
        };

        Ok(self.provider.analyze_redacted_document(&request).await?)
    }

    async fn ensure_configured(&self) -> Result<(), AnalysisError> {
        let status = self.provider.configuration_status().await;
        if status.configured {
            Ok(())
        } else {
            Err(AnalysisError::NotConfigured(status.message.unwrap_or_else(
                || {
                    "Redaction analysis is not configured. Please check your AI provider API keys \
                     in the environment variables."
                        .to_string()
                },
            )))
        }
    }
}
