//! Hugging Face Inference API client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

use otvet_core::{Error, GenerationConfig, LlmProvider, Result};

use crate::config::HfConfig;

#[derive(Serialize)]
struct GenerationParams {
    max_length: u32,
    temperature: f32,
    num_return_sequences: u32,
}

#[derive(Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParams,
}

#[derive(Deserialize)]
struct GenerationResult {
    generated_text: String,
}

/// Client for a hosted text-generation endpoint
///
/// One outbound POST per generation call, no retries. The endpoint echoes
/// the prompt back inside `generated_text`; callers slice the continuation
/// off themselves.
pub struct HfClient {
    config: HfConfig,
    client: Client,
}

impl HfClient {
    /// Create a new client from configuration
    pub fn new(config: HfConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(HfConfig::from_env()?)
    }

    async fn perform_generation(&self, prompt: &str, config: &GenerationConfig) -> Result<String> {
        let request_body = GenerationRequest {
            inputs: prompt,
            parameters: GenerationParams {
                max_length: config.max_length,
                temperature: config.temperature,
                num_return_sequences: config.num_return_sequences,
            },
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_token),
            )
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(e.to_string())
                } else {
                    Error::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let results: Vec<GenerationResult> = response
            .json()
            .await
            .map_err(|e| Error::MalformedResponse(e.to_string()))?;

        let first = results.into_iter().next().ok_or_else(|| {
            Error::MalformedResponse("response contained no results".to_string())
        })?;

        debug!(chars = first.generated_text.chars().count(), "generation succeeded");
        Ok(first.generated_text)
    }
}

#[async_trait]
impl LlmProvider for HfClient {
    async fn generate_with_config(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String> {
        let generation_future = self.perform_generation(prompt, config);

        match timeout(config.timeout, generation_future).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(format!(
                "request exceeded {}s",
                config.timeout.as_secs()
            ))),
        }
    }
}
