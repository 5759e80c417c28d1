//! Inference endpoint configuration

use serde::{Deserialize, Serialize};
use std::env;

use otvet_core::{Error, Result};

/// Default inference endpoint: hosted Mixtral instruct model
pub const DEFAULT_API_URL: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mixtral-8x7B-Instruct-v0.1";

/// Configuration for the Hugging Face inference client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HfConfig {
    pub api_url: String,
    pub api_token: String,
}

impl HfConfig {
    /// Create configuration from environment variables
    ///
    /// `API_TOKEN` is required; `API_URL` overrides the default endpoint.
    /// A local `.env` file is honored.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_token = env::var("API_TOKEN").map_err(|_| {
            Error::Configuration("API_TOKEN environment variable not found".to_string())
        })?;

        let api_url = env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self { api_url, api_token })
    }

    /// Create configuration with explicit values
    pub fn new(api_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_token: api_token.into(),
        }
    }
}
