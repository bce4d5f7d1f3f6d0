use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{api_key, GenerationParams, Provider};
use crate::errors::{Result, SiteGenError};

/// Chat Completions adapter: one system message, one user message.
pub struct OpenAIProvider {
    client: Client,
    params: GenerationParams,
    api_base: String,
}

impl OpenAIProvider {
    pub fn new(client: Client, params: GenerationParams, api_base: String) -> Self {
        Self { client, params, api_base }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessageIn<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessageIn<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessageOut,
}

#[derive(Deserialize)]
struct ChatMessageOut {
    #[serde(default)]
    content: Option<String>,
}

pub(crate) fn extract_content(body: &str) -> Result<String> {
    let parsed: ChatResponse = serde_json::from_str(body).map_err(|e| {
        SiteGenError::GenerationService(format!("failed to parse OpenAI response: {e}"))
    })?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| SiteGenError::GenerationService("OpenAI: empty content".into()))
}

#[async_trait]
impl Provider for OpenAIProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(&self, system: &str, user: &str) -> Result<String> {
        let key = api_key("OPENAI_API_KEY")?;
        let url = format!("{}/v1/chat/completions", self.api_base.trim_end_matches('/'));
        let body = ChatRequest {
            model: &self.params.model,
            messages: [
                ChatMessageIn { role: "system", content: system },
                ChatMessageIn { role: "user", content: user },
            ],
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
        };

        log::debug!("openai: POST {}", url);
        let resp = self.client.post(&url).bearer_auth(key).json(&body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(SiteGenError::GenerationService(format!(
                "OpenAI API error ({status}): {text}"
            )));
        }
        extract_content(&text)
    }
}
