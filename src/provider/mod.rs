use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::cli::ProviderKind;
use crate::config::Config;
use crate::errors::{Result, SiteGenError};
use crate::prompt::SystemInstructions;

pub mod openai;
pub mod anthropic;
pub mod ollama;
#[cfg(test)]
pub mod scripted;

/// Opaque text generation capability: one system message, one user message,
/// plain text back.
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn generate(&self, system: &str, user: &str) -> Result<String>;
}

pub type DynProvider = Arc<dyn Provider>;

/// Sampling knobs shared by every adapter.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl GenerationParams {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            model: cfg.model.clone(),
            max_tokens: cfg.max_tokens,
            temperature: cfg.temperature,
            timeout: Duration::from_secs(cfg.timeout_secs),
        }
    }
}

pub fn make_provider(cfg: &Config) -> Result<DynProvider> {
    let params = GenerationParams::from_config(cfg);
    let client = reqwest::Client::builder()
        .timeout(params.timeout)
        .build()
        .map_err(|e| SiteGenError::Config(format!("http client: {e}")))?;
    Ok(match cfg.provider {
        ProviderKind::OpenAI => Arc::new(openai::OpenAIProvider::new(client, params, cfg.openai_base.clone())),
        ProviderKind::Anthropic => Arc::new(anthropic::Anthropic::new(
            client,
            params,
            cfg.anthropic_base.clone(),
            cfg.anthropic_version.clone(),
        )),
        ProviderKind::Ollama => Arc::new(ollama::Ollama::new(client, params, cfg.ollama_url.clone())),
    })
}

/// Exactly one outbound call, no retry. Blank output counts as a failure.
pub async fn invoke(provider: &dyn Provider, instructions: &SystemInstructions, prompt: &str) -> Result<String> {
    log::info!(
        "calling {} with {} template {}",
        provider.name(),
        instructions.category,
        instructions.version
    );
    let text = provider.generate(&instructions.text, prompt).await?;
    if text.trim().is_empty() {
        return Err(SiteGenError::GenerationService(format!(
            "{} returned no text content",
            provider.name()
        )));
    }
    log::debug!("{} returned {} bytes", provider.name(), text.len());
    Ok(text)
}

pub(crate) fn api_key(var: &str) -> Result<String> {
    std::env::var(var)
        .map_err(|_| SiteGenError::GenerationService(format!("{var} env var is not set")))
}
