//! Comprehensive document analysis orchestration.
//!
//! Routes single-file vs multi-file requests, gates on provider
//! configuration, and isolates per-file failures in batch mode.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use super::AnalysisError;
use crate::ingest::{budget_content, validate, TextExtractor, ValidationOutcome};
use crate::models::{
    AnalysisMode, AnalysisRequest, AnalysisResult, BatchAnalysisResult, BatchStatus,
    ConfigurationStatus, DocumentInfo, RiskLevel, UploadCandidate,
};
use crate::provider::AnalysisProvider;

/// Events emitted while an analysis runs.
#[derive(Debug, Clone)]
pub enum AnalysisEvent {
    /// Analysis started
    Started { total_files: usize },
    /// One file entered the pipeline
    FileStarted { file_name: String },
    /// One file completed successfully
    FileCompleted {
        file_name: String,
        risk_level: RiskLevel,
    },
    /// One file failed; siblings keep going in batch mode
    FileFailed { file_name: String, error: String },
    /// Analysis complete
    Complete { completed: usize, failed: usize },
}

/// What an analysis run produced: one result or a batch aggregate.
#[derive(Debug)]
pub enum AnalysisOutput {
    Single(Box<AnalysisResult>),
    Batch(BatchAnalysisResult),
}

/// Orchestrates validation, extraction, budgeting, and provider calls.
pub struct AnalysisService {
    provider: Arc<dyn AnalysisProvider>,
    extractor: TextExtractor,
    max_content_chars: usize,
}

impl AnalysisService {
    /// Create a new analysis service around a provider.
    pub fn new(provider: Arc<dyn AnalysisProvider>) -> Self {
        Self {
            provider,
            extractor: TextExtractor::new(),
            max_content_chars: crate::ingest::DEFAULT_CONTENT_BUDGET,
        }
    }

    /// Override the content budget for provider payloads.
    pub fn with_max_content_chars(mut self, max_content_chars: usize) -> Self {
        self.max_content_chars = max_content_chars;
        self
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

    /// Analyze one or more documents in the given jurisdiction.
    ///
    /// A single candidate yields `AnalysisOutput::Single`; more than one
    /// yields `AnalysisOutput::Batch` with per-file failure isolation.
    /// The configuration gate runs before any extraction work begins.
    pub async fn analyze(
        &self,
        candidates: Vec<UploadCandidate>,
        jurisdiction: &str,
        event_tx: mpsc::Sender<AnalysisEvent>,
    ) -> Result<AnalysisOutput, AnalysisError> {
        if candidates.is_empty() {
            return Err(AnalysisError::NoDocuments);
        }

        self.ensure_configured().await?;

        let _ = event_tx
            .send(AnalysisEvent::Started {
                total_files: candidates.len(),
            })
            .await;

        if candidates.len() == 1 {
            let candidate = &candidates[0];
            let _ = event_tx
                .send(AnalysisEvent::FileStarted {
                    file_name: candidate.original_name.clone(),
                })
                .await;

            match self.analyze_one(candidate, jurisdiction).await {
                Ok(result) => {
                    let _ = event_tx
                        .send(AnalysisEvent::FileCompleted {
                            file_name: candidate.original_name.clone(),
                            risk_level: result.risk_assessment.level,
                        })
                        .await;
                    let _ = event_tx
                        .send(AnalysisEvent::Complete {
                            completed: 1,
                            failed: 0,
                        })
                        .await;
                    Ok(AnalysisOutput::Single(Box::new(result)))
                }
                Err(e) => {
                    let _ = event_tx
                        .send(AnalysisEvent::FileFailed {
                            file_name: candidate.original_name.clone(),
                            error: e.user_message(),
                        })
                        .await;
                    Err(e)
                }
            }
        } else {
            Ok(AnalysisOutput::Batch(
                self.analyze_batch(candidates, jurisdiction, event_tx).await,
            ))
        }
    }

    /// Batch path: files are processed in input order, one file's failure
    /// never aborts its siblings, and no failed file is retried.
    async fn analyze_batch(
        &self,
        candidates: Vec<UploadCandidate>,
        jurisdiction: &str,
        event_tx: mpsc::Sender<AnalysisEvent>,
    ) -> BatchAnalysisResult {
        let total_files = candidates.len();
        let mut results = Vec::new();
        let mut errors = Vec::new();

        info!("Starting batch analysis of {} files", total_files);

        for candidate in &candidates {
            let _ = event_tx
                .send(AnalysisEvent::FileStarted {
                    file_name: candidate.original_name.clone(),
                })
                .await;

            match self.analyze_one(candidate, jurisdiction).await {
                Ok(result) => {
                    let _ = event_tx
                        .send(AnalysisEvent::FileCompleted {
                            file_name: candidate.original_name.clone(),
                            risk_level: result.risk_assessment.level,
                        })
                        .await;
                    results.push(result);
                }
                Err(e) => {
                    let message = e.user_message();
                    warn!("Batch file {} failed: {}", candidate.original_name, message);
                    let _ = event_tx
                        .send(AnalysisEvent::FileFailed {
                            file_name: candidate.original_name.clone(),
                            error: message.clone(),
                        })
                        .await;
                    errors.push(format!("{}: {}", candidate.original_name, message));
                }
            }
        }

        let completed_files = results.len();
        let status = if errors.is_empty() && completed_files == total_files {
            BatchStatus::Completed
        } else {
            BatchStatus::CompletedWithErrors
        };

        let _ = event_tx
            .send(AnalysisEvent::Complete {
                completed: completed_files,
                failed: errors.len(),
            })
            .await;

        BatchAnalysisResult {
            total_files,
            completed_files,
            status,
            results,
            errors,
        }
    }

    /// Validate, extract, budget, and analyze one document.
    async fn analyze_one(
        &self,
        candidate: &UploadCandidate,
        jurisdiction: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        if let ValidationOutcome::Rejected(reason) = validate(candidate) {
            return Err(reason.into());
        }

        // Extraction completes fully before the request is built: content
        // is budgeted from the whole text, never a partial read.
        let document = self.extractor.extract(candidate).await?;
        let content = budget_content(&document.text, self.max_content_chars).into_owned();

        let request = AnalysisRequest {
            content,
            jurisdiction: jurisdiction.to_string(),
            analysis_mode: AnalysisMode::Comprehensive,
            file_name: document.source_name.clone(),
            file_size: document.source_size,
            file_type: document.source_mime_type.clone(),
        };

        let mut result = self.provider.analyze_document(&request).await?;
        if result.document_info.is_none() {
            result.document_info = Some(DocumentInfo {
                file_name: document.source_name,
                file_size: Some(document.source_size),
                file_type: Some(document.source_mime_type),
            });
        }
        Ok(result)
    }

    async fn ensure_configured(&self) -> Result<(), AnalysisError> {
        let status = self.provider.configuration_status().await;
        if status.configured {
            Ok(())
        } else {
            Err(AnalysisError::NotConfigured(status.message.unwrap_or_else(
                || {
                    "Document analysis is not configured. Please check your AI provider API keys \
                     in the environment variables."
                        .to_string()
                },
            )))
        }
    }
}
