use scraper::Html;

use sa_core::text::{count_words, extract_excerpt, EXCERPT_MAX_CHARS};
use sa_core::types::{
    ArticleContent, ArticleMeta, ArticleMetrics, MetricValue, ParsedArticle, NOT_AVAILABLE,
};

use crate::parsers::{util, ArticleParser};

const TITLE_SELECTORS: &[&str] = &["h1.rich_media_title", "#activity-name"];
const AUTHOR_SELECTORS: &[&str] = &["#js_name", ".rich_media_meta_text"];
const TIME_SELECTORS: &[&str] = &["#publish_time"];
const CONTENT_SELECTOR: &str = "#js_content";
const VIEWS_SELECTOR: &str = "#js_read_num";
const LIKES_SELECTOR: &str = "#js_like_num";

/// Below this the content container is treated as absent and the whole
/// page body is stripped instead.
const MIN_CONTAINER_CHARS: usize = 100;

const METRICS_NOTE: &str = "微信公众号的阅读量、点赞数等数据需要通过官方API获取，仅对已授权账号有效";

/// Parser for WeChat public-account articles (mp.weixin.qq.com).
#[derive(Debug, Clone, Default)]
pub struct WechatParser;

impl WechatParser {
    pub fn new() -> Self {
        Self
    }
}

impl ArticleParser for WechatParser {
    fn can_handle(&self, url: &str) -> bool {
        url.contains("mp.weixin.qq.com")
    }

    fn parse(&self, html: &str) -> ParsedArticle {
        let document = Html::parse_document(html);
        let mut notes = Vec::new();

        let title = util::first_text(&document, TITLE_SELECTORS)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let author = util::first_text(&document, AUTHOR_SELECTORS)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let publish_time = util::first_text(&document, TIME_SELECTORS)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let mut text = util::first_text(&document, &[CONTENT_SELECTOR]).unwrap_or_default();
        if text.chars().count() < MIN_CONTAINER_CHARS {
            // container absence usually means the whole page is the content
            let body = util::body_text(&document);
            if !body.is_empty() {
                text = body;
            }
        }

        let word_count = count_words(&text);
        let excerpt = extract_excerpt(&text, EXCERPT_MAX_CHARS);

        notes.push(METRICS_NOTE.to_string());

        let mut metrics = ArticleMetrics::default();
        if let Some(views) = util::first_text(&document, &[VIEWS_SELECTOR]) {
            metrics.views = MetricValue::parse(&views);
        }
        if let Some(likes) = util::first_text(&document, &[LIKES_SELECTOR]) {
            metrics.likes = MetricValue::parse(&likes);
        }

        ParsedArticle {
            meta: ArticleMeta {
                title,
                author,
                publish_time,
                word_count,
            },
            metrics,
            content: ArticleContent { text, excerpt },
            notes,
        }
    }
}
