use std::fmt;

use async_trait::async_trait;
use reqwest::Client;

use sa_core::types::Analysis;
use sa_core::{Error, Result};

use crate::prompt::build_prompt;
use crate::providers::{AiProvider, ChatMessage, ChatRequest, ChatResponse, ResponseFormat};

const API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4.1-mini";
const SYSTEM_PROMPT: &str = "你是一个专业的内容分析助手，擅长提取关键词和总结要点。";

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

impl fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn analyze(&self, text: &str, top_k: usize, language: &str) -> Result<Analysis> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_prompt(text, top_k, language),
                },
            ],
            temperature: 0.3,
            response_format: Some(ResponseFormat {
                kind: "json_object".to_string(),
            }),
        };

        let response = self
            .client
            .post(API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Analysis(format!(
                "OpenAI API error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown")
            )));
        }

        let payload = response.json::<ChatResponse>().await?;
        let content = payload
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::Analysis("OpenAI returned no choices".to_string()))?
            .message
            .content;

        tracing::debug!(chars = content.chars().count(), "OpenAI analysis received");
        Ok(serde_json::from_str(&content)?)
    }
}
