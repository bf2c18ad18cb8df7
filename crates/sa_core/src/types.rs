use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Placeholder for fields that could not be recovered from the page.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Wechat,
    Xiaohongshu,
    Unknown,
}

impl Platform {
    /// Identifies the source platform by literal domain containment.
    pub fn identify(url: &str) -> Self {
        if url.contains("mp.weixin.qq.com") {
            return Platform::Wechat;
        }
        if url.contains("xiaohongshu.com") || url.contains("xhslink.com") {
            return Platform::Xiaohongshu;
        }
        Platform::Unknown
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Wechat => "wechat",
            Platform::Xiaohongshu => "xiaohongshu",
            Platform::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    DeepSeek,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::OpenAi => "openai",
            Provider::DeepSeek => "deepseek",
        };
        f.write_str(name)
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(Provider::OpenAi),
            "deepseek" => Ok(Provider::DeepSeek),
            other => Err(Error::InvalidRequest(format!(
                "Unsupported AI provider: {}",
                other
            ))),
        }
    }
}

/// Engagement counter: a clean non-negative integer when the page exposes
/// one, otherwise the raw text as found (localized forms like "1.2万"
/// survive verbatim).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(u64),
    Raw(String),
}

impl MetricValue {
    pub fn na() -> Self {
        MetricValue::Raw(NOT_AVAILABLE.to_string())
    }

    /// Safe parse: trimmed decimal integer, or the raw text unchanged.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<u64>() {
            Ok(n) => MetricValue::Count(n),
            Err(_) => MetricValue::Raw(trimmed.to_string()),
        }
    }

    pub fn is_na(&self) -> bool {
        matches!(self, MetricValue::Raw(s) if s == NOT_AVAILABLE)
    }
}

impl Default for MetricValue {
    fn default() -> Self {
        MetricValue::na()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMeta {
    pub title: String,
    pub author: String,
    pub publish_time: String,
    pub word_count: u32,
}

impl Default for ArticleMeta {
    fn default() -> Self {
        Self {
            title: NOT_AVAILABLE.to_string(),
            author: NOT_AVAILABLE.to_string(),
            publish_time: NOT_AVAILABLE.to_string(),
            word_count: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleMetrics {
    pub views: MetricValue,
    pub likes: MetricValue,
    pub replies: MetricValue,
    pub collects: MetricValue,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleContent {
    pub text: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedArticle {
    pub meta: ArticleMeta,
    pub metrics: ArticleMetrics,
    pub content: ArticleContent,
    pub notes: Vec<String>,
}

/// Analysis result as returned by the backend. Every field is required:
/// a payload missing any of them fails deserialization instead of being
/// silently padded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub keywords: Vec<String>,
    pub tags: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub url: String,
    pub provider: Provider,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_top_k() -> usize {
    12
}

fn default_language() -> String {
    "zh".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    pub fetch_status: u16,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub platform: Platform,
    pub meta: ArticleMeta,
    pub metrics: ArticleMetrics,
    pub content: ArticleContent,
    pub ai: Analysis,
    pub debug: DebugInfo,
}
