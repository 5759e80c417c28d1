//! LLM provider trait and generation configuration

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::Result;

/// Configuration for text generation
///
/// Mirrors the recognized options of the hosted inference endpoint. The
/// defaults are the fixed values the service sends on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub max_length: u32,
    pub temperature: f32,
    pub num_return_sequences: u32,
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_length: 2000,
            temperature: 0.4,
            num_return_sequences: 1,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Trait for LLM providers (hosted inference endpoints)
///
/// The provider returns the raw generated text for a prompt. Post-processing
/// (continuation slicing, sentence extraction) is the caller's concern, since
/// it depends on the prompt that was sent.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate text using the default configuration
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with_config(prompt, &GenerationConfig::default())
            .await
    }

    /// Generate text with custom configuration
    async fn generate_with_config(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_endpoint_parameters() {
        let config = GenerationConfig::default();
        assert_eq!(config.max_length, 2000);
        assert_eq!(config.temperature, 0.4);
        assert_eq!(config.num_return_sequences, 1);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
