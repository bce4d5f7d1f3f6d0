use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{api_key, GenerationParams, Provider};
use crate::errors::{Result, SiteGenError};

pub struct Anthropic {
    client: Client,
    params: GenerationParams,
    api_base: String,
    api_version: String,
}

impl Anthropic {
    pub fn new(client: Client, params: GenerationParams, api_base: String, api_version: String) -> Self {
        Self { client, params, api_base, api_version }
    }
}

#[derive(Serialize)]
struct MsgRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: [Msg<'a>; 1],
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MsgResponse {
    content: Vec<Block>,
}

#[derive(Deserialize)]
struct Block {
    #[serde(default)]
    text: String,
    #[serde(default)]
    r#type: String,
}

/// Concatenated text blocks of a Messages API response.
pub(crate) fn extract_text(body: &str) -> Result<String> {
    let parsed: MsgResponse = serde_json::from_str(body).map_err(|e| {
        SiteGenError::GenerationService(format!("anthropic response parse error: {e}"))
    })?;
    let text: String = parsed
        .content
        .into_iter()
        .filter(|b| b.r#type == "text")
        .map(|b| b.text)
        .collect();
    if text.is_empty() {
        return Err(SiteGenError::GenerationService("anthropic: empty content".into()));
    }
    Ok(text)
}

#[async_trait]
impl Provider for Anthropic {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn generate(&self, system: &str, user: &str) -> Result<String> {
        let key = api_key("ANTHROPIC_API_KEY")?;
        let url = format!("{}/v1/messages", self.api_base.trim_end_matches('/'));
        // Messages API caps temperature at 1.0
        let body = MsgRequest {
            model: &self.params.model,
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature.min(1.0),
            system,
            messages: [Msg { role: "user", content: user }],
        };

        log::debug!("anthropic: POST {}", url);
        let resp = self
            .client
            .post(&url)
            .header("x-api-key", key)
            .header("anthropic-version", &self.api_version)
            .json(&body)
            .send()
            .await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(SiteGenError::GenerationService(format!(
                "anthropic API error ({status}): {text}"
            )));
        }
        extract_text(&text)
    }
}
