use std::sync::Arc;

use async_trait::async_trait;

use sa_ai::providers::{DefaultProviderFactory, ProviderFactory, ProviderKeys};
use sa_core::types::{AnalyzeRequest, AnalyzeResponse, DebugInfo, Platform};
use sa_core::{Error, Result};

use crate::parsers::parser_for;

/// Upstream pages reject clients that do not identify as a browser.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Extracted body text below this is unusable for analysis.
const MIN_BODY_CHARS: usize = 50;

/// Raw page as returned by the transport.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

/// Network capability the pipeline consumes.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

/// Default fetcher: reqwest with a browser User-Agent, transport-default
/// timeouts, no retries.
#[derive(Debug, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| Error::Fetch {
                status: 0,
                reason: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let reason = response
                .status()
                .canonical_reason()
                .unwrap_or("unknown")
                .to_string();
            return Err(Error::Fetch {
                status,
                reason: format!("Failed to fetch page: {} {}", status, reason),
            });
        }

        let body = response.text().await.map_err(|e| Error::Fetch {
            status,
            reason: e.to_string(),
        })?;

        Ok(FetchedPage { status, body })
    }
}

/// Drives one request through validate → route → fetch → extract →
/// analyze → assemble. Every failure is terminal for the request; nothing
/// is retried or cached.
pub struct AnalysisPipeline {
    fetcher: Arc<dyn PageFetcher>,
    providers: Arc<dyn ProviderFactory>,
    keys: ProviderKeys,
}

impl AnalysisPipeline {
    pub fn new(keys: ProviderKeys) -> Self {
        Self {
            fetcher: Arc::new(HttpFetcher::new()),
            providers: Arc::new(DefaultProviderFactory),
            keys,
        }
    }

    /// Builds a pipeline around injected collaborators.
    pub fn with_collaborators(
        fetcher: Arc<dyn PageFetcher>,
        providers: Arc<dyn ProviderFactory>,
        keys: ProviderKeys,
    ) -> Self {
        Self {
            fetcher,
            providers,
            keys,
        }
    }

    pub async fn run(&self, request: AnalyzeRequest) -> Result<AnalyzeResponse> {
        if request.url.trim().is_empty() {
            return Err(Error::InvalidRequest(
                "Missing required parameters: url, provider".to_string(),
            ));
        }

        let platform = Platform::identify(&request.url);
        if platform == Platform::Unknown {
            return Err(Error::UnsupportedPlatform(
                "Only WeChat and Xiaohongshu are supported.".to_string(),
            ));
        }
        let parser = parser_for(&request.url).ok_or_else(|| {
            Error::UnsupportedPlatform("No parser found for this URL.".to_string())
        })?;

        tracing::info!(%platform, url = %request.url, "🌐 fetching article page");
        let page = self.fetcher.fetch(&request.url).await?;

        let parsed = parser.parse(&page.body);
        let text_chars = parsed.content.text.chars().count();
        if text_chars < MIN_BODY_CHARS {
            tracing::warn!(chars = text_chars, "extracted body below usable minimum");
            return Err(Error::InsufficientContent(
                "提取的文章内容过少，可能页面结构已变化或需要登录访问".to_string(),
            ));
        }

        let api_key = self
            .keys
            .key_for(request.provider)
            .ok_or_else(|| {
                Error::MissingCredential(request.provider.to_string().to_uppercase())
            })?
            .to_string();

        let provider = self
            .providers
            .create(request.provider, api_key, request.model.clone());
        tracing::info!(provider = provider.name(), top_k = request.top_k, "🤖 running analysis");
        let ai = provider
            .analyze(&parsed.content.text, request.top_k, &request.language)
            .await
            .map_err(|e| match e {
                Error::Analysis(_) => e,
                other => Error::Analysis(other.to_string()),
            })?;

        tracing::info!(words = parsed.meta.word_count, "✨ analysis complete");
        Ok(AnalyzeResponse {
            platform,
            meta: parsed.meta,
            metrics: parsed.metrics,
            content: parsed.content,
            ai,
            debug: DebugInfo {
                fetch_status: page.status,
                notes: parsed.notes,
            },
        })
    }
}
