//! Hugging Face Inference API integration for otvet
//!
//! This crate provides the hosted-inference implementation of the
//! LlmProvider trait.

mod client;
mod config;


pub use client::HfClient;
pub use config::HfConfig;

// Re-export core types for convenience
pub use otvet_core::{Error, GenerationConfig, LlmProvider, Result};
