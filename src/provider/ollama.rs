use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{GenerationParams, Provider};
use crate::errors::{Result, SiteGenError};

pub struct Ollama {
    client: Client,
    params: GenerationParams,
    url: String,
}

impl Ollama {
    pub fn new(client: Client, params: GenerationParams, url: String) -> Self {
        Self { client, params, url }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [Msg<'a>; 2],
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: MsgOut,
}

#[derive(Deserialize)]
struct MsgOut {
    content: String,
}

#[async_trait]
impl Provider for Ollama {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn generate(&self, system: &str, user: &str) -> Result<String> {
        let url = format!("{}/api/chat", self.url.trim_end_matches('/'));
        let body = ChatRequest {
            model: &self.params.model,
            messages: [
                Msg { role: "system", content: system },
                Msg { role: "user", content: user },
            ],
            stream: false,
            options: OllamaOptions {
                temperature: self.params.temperature,
                num_predict: self.params.max_tokens,
            },
        };

        log::debug!("ollama: POST {}", url);
        let resp = self.client.post(&url).json(&body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(SiteGenError::GenerationService(format!("ollama error ({status}): {text}")));
        }
        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| SiteGenError::GenerationService(format!("ollama response parse error: {e}")))?;
        Ok(parsed.message.content)
    }
}
