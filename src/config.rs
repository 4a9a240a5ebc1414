//! Analysis provider configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ingest::DEFAULT_CONTENT_BUDGET;

/// Which AI provider backs the analysis. All variants speak the
/// OpenAI-compatible chat-completions protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI API (default)
    #[default]
    OpenAi,
    /// Groq API
    Groq,
    /// Any other OpenAI-compatible endpoint
    Custom,
}

impl ProviderKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "groq" => Some(Self::Groq),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Groq => "groq",
            Self::Custom => "custom",
        }
    }

    fn default_endpoint(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com",
            Self::Groq => "https://api.groq.com/openai",
            Self::Custom => "http://localhost:8080",
        }
    }
}

/// Configuration for the analysis provider client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider backing the analysis
    #[serde(default)]
    pub provider: ProviderKind,
    /// API endpoint (provider-specific defaults apply)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model used for analysis
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens in the model response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Temperature for generation (0.0 - 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum characters of document content sent for comprehensive analysis
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
    /// Request timeout in seconds (analysis of long documents can take minutes)
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Custom comprehensive-analysis prompt ({jurisdiction} and {content} placeholders)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_prompt: Option<String>,
    /// Custom redaction-analysis prompt ({jurisdiction} and {content} placeholders)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redaction_prompt: Option<String>,
}

fn default_endpoint() -> String {
    ProviderKind::default().default_endpoint().to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_content_chars() -> usize {
    DEFAULT_CONTENT_BUDGET
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for ProviderConfig {
    fn default() -> Self {
        // Pure: env overrides are applied only by `load`.
        Self::base_default()
    }
}

impl ProviderConfig {
    /// Base default without env overrides.
    pub fn base_default() -> Self {
        Self {
            provider: ProviderKind::default(),
            endpoint: default_endpoint(),
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            max_content_chars: default_max_content_chars(),
            request_timeout_secs: default_timeout_secs(),
            analysis_prompt: None,
            redaction_prompt: None,
        }
    }

    /// Load configuration from an optional TOML file, then apply env
    /// overrides on top.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let base = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)?;
                toml::from_str(&raw)?
            }
            None => Self::base_default(),
        };
        Ok(base.with_env_overrides())
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `LEXISCAN_PROVIDER`: "openai" (default), "groq", or "custom"
    /// - `LEXISCAN_ENDPOINT`: API endpoint (defaults based on provider)
    /// - `LEXISCAN_API_KEY`: API key
    /// - `LEXISCAN_MODEL`: model name
    /// - `LEXISCAN_MAX_TOKENS`: maximum tokens in response
    /// - `LEXISCAN_TEMPERATURE`: generation temperature (0.0 - 1.0)
    /// - `LEXISCAN_MAX_CONTENT_CHARS`: content budget for comprehensive analysis
    ///
    /// Priority: `LEXISCAN_PROVIDER` wins over auto-detection from API keys.
    /// Without it, `GROQ_API_KEY` or `OPENAI_API_KEY` selects the provider.
    pub fn with_env_overrides(mut self) -> Self {
        let explicit_provider = std::env::var("LEXISCAN_PROVIDER").ok();
        if let Some(ref val) = explicit_provider {
            if let Some(provider) = ProviderKind::parse(val) {
                self.provider = provider;
            }
        }

        let explicit_endpoint = std::env::var("LEXISCAN_ENDPOINT").ok();
        if let Some(ref endpoint) = explicit_endpoint {
            self.endpoint = endpoint.clone();
        }

        if let Ok(val) = std::env::var("LEXISCAN_API_KEY") {
            self.api_key = Some(val);
        }

        if explicit_provider.is_some() {
            if explicit_endpoint.is_none() {
                self.endpoint = self.provider.default_endpoint().to_string();
            }
            if self.api_key.is_none() {
                self.api_key = match self.provider {
                    ProviderKind::Groq => std::env::var("GROQ_API_KEY").ok(),
                    ProviderKind::OpenAi => std::env::var("OPENAI_API_KEY").ok(),
                    ProviderKind::Custom => None,
                };
            }
        } else if self.api_key.is_none() {
            // No explicit provider: auto-detect from available keys.
            if let Ok(key) = std::env::var("GROQ_API_KEY") {
                self.api_key = Some(key);
                self.provider = ProviderKind::Groq;
                if explicit_endpoint.is_none() {
                    self.endpoint = ProviderKind::Groq.default_endpoint().to_string();
                }
            } else if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                self.api_key = Some(key);
                self.provider = ProviderKind::OpenAi;
                if explicit_endpoint.is_none() {
                    self.endpoint = ProviderKind::OpenAi.default_endpoint().to_string();
                }
            }
        }

        if let Ok(val) = std::env::var("LEXISCAN_MODEL") {
            self.model = val;
        }
        if let Ok(val) = std::env::var("LEXISCAN_MAX_TOKENS") {
            if let Ok(n) = val.parse() {
                self.max_tokens = n;
            }
        }
        if let Ok(val) = std::env::var("LEXISCAN_TEMPERATURE") {
            if let Ok(t) = val.parse() {
                self.temperature = t;
            }
        }
        if let Ok(val) = std::env::var("LEXISCAN_MAX_CONTENT_CHARS") {
            if let Ok(n) = val.parse() {
                self.max_content_chars = n;
            }
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Whether an API key is present at all.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_defaults() {
        let config = ProviderConfig::base_default();
        assert_eq!(config.provider, ProviderKind::OpenAi);
        assert_eq!(config.endpoint, "https://api.openai.com");
        assert_eq!(config.max_content_chars, 12_000);
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!(ProviderKind::parse("groq"), Some(ProviderKind::Groq));
        assert_eq!(ProviderKind::parse("OpenAI"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::parse("ollama"), None);
    }

    #[test]
    fn test_default_ignores_environment() {
        std::env::set_var("LEXISCAN_MODEL", "env-model");
        let config = ProviderConfig::default();
        assert_eq!(config.model, default_model());
        assert_eq!(config, ProviderConfig::base_default());
        std::env::remove_var("LEXISCAN_MODEL");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ProviderConfig::base_default()
            .with_endpoint("http://localhost:11434")
            .with_api_key("sk-test")
            .with_model("gpt-4o");
        let raw = toml::to_string(&config).unwrap();
        let decoded: ProviderConfig = toml::from_str(&raw).unwrap();
        assert_eq!(decoded, config);
        assert_eq!(decoded.endpoint, "http://localhost:11434");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let decoded: ProviderConfig = toml::from_str("model = \"llama-3.3-70b\"").unwrap();
        assert_eq!(decoded.model, "llama-3.3-70b");
        assert_eq!(decoded.max_content_chars, 12_000);
        assert_eq!(decoded.request_timeout_secs, 300);
    }
}
