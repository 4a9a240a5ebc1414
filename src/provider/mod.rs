//! Analysis provider client.
//!
//! The orchestrators talk to the provider through the [`AnalysisProvider`]
//! trait so they can be exercised without a network. The production
//! implementation is [`HttpAnalysisProvider`], which drives an
//! OpenAI-compatible chat-completions API.

mod client;
mod json;
mod prompts;

use async_trait::async_trait;
use thiserror::Error;

pub use client::HttpAnalysisProvider;
pub(crate) use json::extract_json_object;

use crate::models::{
    AnalysisRequest, AnalysisResult, ConfigurationStatus, RedactionAnalysisResult,
    RedactionRequest,
};

/// Errors that can occur while invoking the analysis provider.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Failed to reach the provider
    #[error("Connection error: {0}")]
    Connection(String),
    /// Provider returned an error
    #[error("API error: {0}")]
    Api(String),
    /// Failed to parse the provider response
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ProviderError {
    /// The provider-supplied message, without the error-kind prefix.
    /// May be empty, in which case callers fall back to a generic message.
    pub fn message(&self) -> &str {
        match self {
            Self::Connection(m) | Self::Api(m) | Self::Parse(m) => m,
        }
    }
}

/// Remote analysis capability consumed by the orchestrators.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Probe whether the provider is usable. Never fails: errors are
    /// encoded in the returned value with `configured: false`.
    async fn configuration_status(&self) -> ConfigurationStatus;

    /// Run a comprehensive analysis on one document.
    async fn analyze_document(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, ProviderError>;

    /// Run a redaction-impact analysis on one document.
    async fn analyze_redacted_document(
        &self,
        request: &RedactionRequest,
    ) -> Result<RedactionAnalysisResult, ProviderError>;
}
