use std::fmt;

use async_trait::async_trait;
use reqwest::Client;

use sa_core::types::Analysis;
use sa_core::{Error, Result};

use crate::prompt::build_prompt;
use crate::providers::{AiProvider, ChatMessage, ChatRequest, ChatResponse};

const API_URL: &str = "https://api.deepseek.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "deepseek-chat";
const SYSTEM_PROMPT: &str =
    "你是一个专业的内容分析助手，擅长提取关键词和总结要点。请始终以JSON格式返回结果。";

pub struct DeepSeekProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl DeepSeekProvider {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

impl fmt::Debug for DeepSeekProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepSeekProvider")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

/// DeepSeek sometimes wraps the JSON object in a fenced ```json block.
fn strip_code_fence(content: &str) -> String {
    content
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

#[async_trait]
impl AiProvider for DeepSeekProvider {
    fn name(&self) -> &str {
        "DeepSeek"
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
            response_format: None,
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
                "DeepSeek API error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown")
            )));
        }

        let payload = response.json::<ChatResponse>().await?;
        let content = payload
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::Analysis("DeepSeek returned no choices".to_string()))?
            .message
            .content;

        tracing::debug!(chars = content.chars().count(), "DeepSeek analysis received");
        Ok(serde_json::from_str(&strip_code_fence(&content))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fenced_json_wrapper() {
        let fenced = "```json\n{\"keywords\":[\"a\"],\"tags\":[\"b\"],\"summary\":\"c\"}\n```";
        let clean = strip_code_fence(fenced);
        let analysis: Analysis = serde_json::from_str(&clean).unwrap();
        assert_eq!(analysis.keywords, vec!["a"]);
        assert_eq!(analysis.summary, "c");
    }

    #[test]
    fn leaves_bare_json_untouched() {
        let bare = "{\"keywords\":[],\"tags\":[],\"summary\":\"s\"}";
        assert_eq!(strip_code_fence(bare), bare);
    }
}
