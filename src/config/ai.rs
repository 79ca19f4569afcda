//! Language-model provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Language-model provider configuration (xAI Grok)
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// xAI API key. The one required secret: absence is fatal at startup.
    pub xai_api_key: Option<String>,

    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL for the OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The configured API key, if any
    pub fn api_key(&self) -> Option<&str> {
        self.xai_api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key().is_none() {
            return Err(ValidationError::MissingRequired(
                "OMNI_CONCIERGE__AI__XAI_API_KEY",
            ));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            xai_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "grok-2-latest".to_string()
}

fn default_base_url() -> String {
    "https://api.x.ai/v1".to_string()
}

fn default_timeout() -> u64 {
    60
}
