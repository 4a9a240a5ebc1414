//! HTTP client for OpenAI-compatible analysis providers.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{extract_json_object, prompts, AnalysisProvider, ProviderError};
use crate::config::ProviderConfig;
use crate::models::{
    AnalysisRequest, AnalysisResult, ConfigurationStatus, ProviderStatus,
    RedactionAnalysisResult, RedactionRequest,
};

/// Probe timeout; the configuration check must stay snappy even when the
/// analysis timeout allows minutes.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Analysis provider over an OpenAI-compatible chat-completions API.
pub struct HttpAnalysisProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

/// Chat-completions request format.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat-completions response format.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl HttpAnalysisProvider {
    /// Create a new provider client with the given configuration.
    pub fn new(config: ProviderConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Get the config.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Run one chat completion and return the raw assistant message.
    async fn complete(&self, prompt: String) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: prompts::SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!("{}/v1/chat/completions", self.config.endpoint);
        let mut builder = self.client.post(&url).json(&request);
        if let Some(key) = self.config.api_key.as_deref() {
            builder = builder.bearer_auth(key);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!("HTTP {}: {}", status, body)));
        }

        let chat: ChatResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        chat.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ProviderError::Parse("Provider returned no choices".to_string()))
    }

    /// Extract and decode the JSON object carried in a completion.
    fn decode_payload<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, ProviderError> {
        let json = extract_json_object(raw)
            .ok_or_else(|| ProviderError::Parse("No JSON object found in provider response".to_string()))?;
        serde_json::from_str(&json).map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

#[async_trait]
impl AnalysisProvider for HttpAnalysisProvider {
    async fn configuration_status(&self) -> ConfigurationStatus {
        let name = self.config.provider.name().to_string();

        if !self.config.has_api_key() {
            return ConfigurationStatus {
                configured: false,
                message: Some(
                    "No AI provider API key is configured. Set OPENAI_API_KEY or GROQ_API_KEY."
                        .to_string(),
                ),
                available_providers: Some(vec![ProviderStatus {
                    name,
                    configured: false,
                    available: false,
                }]),
            };
        }

        // Fail closed: any error contacting the models endpoint reports
        // "not configured" rather than propagating.
        let url = format!("{}/v1/models", self.config.endpoint);
        let mut builder = self.client.get(&url).timeout(PROBE_TIMEOUT);
        if let Some(key) = self.config.api_key.as_deref() {
            builder = builder.bearer_auth(key);
        }

        match builder.send().await {
            Ok(resp) if resp.status().is_success() => {
                debug!("provider {} reachable", name);
                ConfigurationStatus {
                    configured: true,
                    message: None,
                    available_providers: Some(vec![ProviderStatus {
                        name,
                        configured: true,
                        available: true,
                    }]),
                }
            }
            Ok(resp) => ConfigurationStatus {
                configured: false,
                message: Some(format!(
                    "Analysis provider returned HTTP {} during the configuration check.",
                    resp.status()
                )),
                available_providers: Some(vec![ProviderStatus {
                    name,
                    configured: true,
                    available: false,
                }]),
            },
            Err(_) => ConfigurationStatus {
                configured: false,
                message: Some("Failed to check document analysis configuration".to_string()),
                available_providers: Some(vec![ProviderStatus {
                    name,
                    configured: true,
                    available: false,
                }]),
            },
        }
    }

    async fn analyze_document(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, ProviderError> {
        let template = self
            .config
            .analysis_prompt
            .as_deref()
            .unwrap_or(prompts::DEFAULT_ANALYSIS_PROMPT);
        let prompt = prompts::render(
            template,
            &request.jurisdiction,
            &request.file_name,
            &request.content,
        );

        info!(
            "Analyzing document: {} ({} chars)",
            request.file_name,
            request.content.chars().count()
        );
        let raw = self.complete(prompt).await?;
        Self::decode_payload(&raw)
    }

    async fn analyze_redacted_document(
        &self,
        request: &RedactionRequest,
    ) -> Result<RedactionAnalysisResult, ProviderError> {
        let template = self
            .config
            .redaction_prompt
            .as_deref()
            .unwrap_or(prompts::DEFAULT_REDACTION_PROMPT);
        let prompt = prompts::render(
            template,
            &request.jurisdiction,
            &request.file_name,
            &request.content,
        );

        info!("Analyzing redacted document: {}", request.file_name);
        let raw = self.complete(prompt).await?;
        Self::decode_payload(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_payload_from_fenced_output() {
        let raw = "```json\n{\"riskAssessment\":{\"level\":\"LOW\",\"score\":2},\"summary\":\"Fine.\",\"keyFindings\":[]}\n```";
        let result: AnalysisResult = HttpAnalysisProvider::decode_payload(raw).unwrap();
        assert_eq!(result.summary, "Fine.");
    }

    #[test]
    fn test_decode_payload_rejects_prose() {
        let err =
            HttpAnalysisProvider::decode_payload::<AnalysisResult>("I cannot analyze this.")
                .unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }
}
