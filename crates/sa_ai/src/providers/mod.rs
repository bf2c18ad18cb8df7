use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use sa_core::types::{Analysis, Provider};
use sa_core::Result;

pub mod deepseek;
pub mod openai;

pub use deepseek::DeepSeekProvider;
pub use openai::OpenAiProvider;

/// Capability contract for a summarization backend.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Backend name, for logs and error messages.
    fn name(&self) -> &str;

    /// Extracts keywords, tags and a summary from normalized article text.
    async fn analyze(&self, text: &str, top_k: usize, language: &str) -> Result<Analysis>;
}

/// Maps a backend choice plus caller-supplied credentials to a concrete
/// adapter.
pub fn create_provider(
    provider: Provider,
    api_key: String,
    model: Option<String>,
) -> Box<dyn AiProvider> {
    match provider {
        Provider::OpenAi => Box::new(OpenAiProvider::new(api_key, model)),
        Provider::DeepSeek => Box::new(DeepSeekProvider::new(api_key, model)),
    }
}

/// Adapter construction as an injectable collaborator, so the pipeline can
/// run against a stub backend in tests.
pub trait ProviderFactory: Send + Sync {
    fn create(&self, provider: Provider, api_key: String, model: Option<String>)
        -> Box<dyn AiProvider>;
}

#[derive(Debug, Default)]
pub struct DefaultProviderFactory;

impl ProviderFactory for DefaultProviderFactory {
    fn create(
        &self,
        provider: Provider,
        api_key: String,
        model: Option<String>,
    ) -> Box<dyn AiProvider> {
        create_provider(provider, api_key, model)
    }
}

/// Per-backend secrets, looked up by provider at analysis time.
#[derive(Debug, Clone, Default)]
pub struct ProviderKeys {
    pub openai: Option<String>,
    pub deepseek: Option<String>,
}

impl ProviderKeys {
    pub fn from_env() -> Self {
        Self {
            openai: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            deepseek: std::env::var("DEEPSEEK_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
        }
    }

    pub fn key_for(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::OpenAi => self.openai.as_deref(),
            Provider::DeepSeek => self.deepseek.as_deref(),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Serialize)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
pub(crate) struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Deserialize)]
pub(crate) struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Deserialize)]
pub(crate) struct Choice {
    pub message: Message,
}

#[derive(Deserialize)]
pub(crate) struct Message {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_selects_adapter_by_provider() {
        let openai = create_provider(Provider::OpenAi, "k".into(), None);
        assert_eq!(openai.name(), "OpenAI");
        let deepseek = create_provider(Provider::DeepSeek, "k".into(), None);
        assert_eq!(deepseek.name(), "DeepSeek");
    }

    #[test]
    fn keys_resolve_per_provider() {
        let keys = ProviderKeys {
            openai: Some("sk-openai".into()),
            deepseek: None,
        };
        assert_eq!(keys.key_for(Provider::OpenAi), Some("sk-openai"));
        assert_eq!(keys.key_for(Provider::DeepSeek), None);
    }
}
