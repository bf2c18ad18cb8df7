use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

use sa_core::text::{count_words, extract_excerpt, strip_html, EXCERPT_MAX_CHARS};
use sa_core::types::{
    ArticleContent, ArticleMeta, ArticleMetrics, MetricValue, ParsedArticle, NOT_AVAILABLE,
};

use crate::parsers::{util, ArticleParser};

const STRUCTURED_DATA_SELECTOR: &str = "script[type=\"application/ld+json\"]";
const TITLE_META_SELECTORS: &[(&str, &str)] = &[("meta[property=\"og:title\"]", "content")];
const AUTHOR_META_SELECTORS: &[(&str, &str)] = &[("meta[name=\"author\"]", "content")];
const CONTENT_SELECTORS: &[&str] = &[
    "[class*=\"note-content\"]",
    "[class*=\"content\"]",
    "[class*=\"desc\"]",
];
const METRIC_SELECTORS: &[&str] = &["[class*=\"count\"]", "[class*=\"number\"]"];

/// Candidates shorter than this are rejected and the next container is
/// tried; the same threshold gates the whole-body fallback.
const MIN_CONTENT_CHARS: usize = 50;

const VOLATILE_NOTE: &str = "小红书的数据结构可能因页面更新而变化";
const VIEWS_NOTE: &str = "浏览量数据未在页面公开展示";

/// Parser for Xiaohongshu notes (xiaohongshu.com, xhslink.com).
/// Structured data is preferred; markup scanning only fills the gaps.
#[derive(Debug, Clone, Default)]
pub struct XiaohongshuParser;

impl XiaohongshuParser {
    pub fn new() -> Self {
        Self
    }
}

/// First JSON-LD block describing an Article, if any.
fn structured_article(document: &Html) -> Option<Value> {
    if let Ok(selector) = Selector::parse(STRUCTURED_DATA_SELECTOR) {
        for script in document.select(&selector) {
            let raw = script.text().collect::<String>();
            if let Ok(json) = serde_json::from_str::<Value>(raw.trim()) {
                if json.get("@type").and_then(Value::as_str) == Some("Article") {
                    return Some(json);
                }
            }
        }
    }
    None
}

fn structured_string(article: &Value, field: &str) -> Option<String> {
    article
        .get(field)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn structured_author(article: &Value) -> Option<String> {
    let name = match article.get("author") {
        Some(Value::Object(author)) => author.get("name").and_then(Value::as_str),
        Some(Value::String(name)) => Some(name.as_str()),
        _ => None,
    };
    name.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// The element's own text plus its parent's, which is where the 赞/评论/
/// 收藏/浏览 labels sit relative to a bare counter.
fn context_text(element: ElementRef) -> String {
    let mut context = element.text().collect::<String>();
    if let Some(parent) = element.parent().and_then(ElementRef::wrap) {
        context.push(' ');
        context.push_str(&parent.text().collect::<String>());
    }
    context
}

fn scan_metrics(document: &Html, metrics: &mut ArticleMetrics) {
    for raw in METRIC_SELECTORS {
        let selector = match Selector::parse(raw) {
            Ok(selector) => selector,
            Err(_) => continue,
        };
        for element in document.select(&selector) {
            let own_text = element.text().collect::<String>();
            let own_text = own_text.trim();
            if !own_text.chars().any(|c| c.is_ascii_digit()) {
                continue;
            }
            let value = MetricValue::parse(own_text);
            let context = context_text(element).to_lowercase();

            if context.contains('赞') || context.contains("like") {
                if metrics.likes.is_na() {
                    metrics.likes = value;
                }
            } else if context.contains("评论") || context.contains("comment") {
                if metrics.replies.is_na() {
                    metrics.replies = value;
                }
            } else if context.contains("收藏") || context.contains("collect") {
                if metrics.collects.is_na() {
                    metrics.collects = value;
                }
            } else if context.contains("浏览") || context.contains("view") {
                if metrics.views.is_na() {
                    metrics.views = value;
                }
            }
        }
    }
}

impl ArticleParser for XiaohongshuParser {
    fn can_handle(&self, url: &str) -> bool {
        url.contains("xiaohongshu.com") || url.contains("xhslink.com")
    }

    fn parse(&self, html: &str) -> ParsedArticle {
        let document = Html::parse_document(html);
        let mut notes = Vec::new();

        let mut title = None;
        let mut author = None;
        let mut publish_time = None;
        let mut text = String::new();

        if let Some(article) = structured_article(&document) {
            title = structured_string(&article, "headline");
            author = structured_author(&article);
            publish_time = structured_string(&article, "datePublished");
            if let Some(body) = structured_string(&article, "articleBody") {
                text = body;
            }
        }

        // each gap fills independently from page metadata
        if title.is_none() {
            title = util::first_attr(&document, TITLE_META_SELECTORS)
                .or_else(|| util::first_text(&document, &["title"]));
        }
        if author.is_none() {
            author = util::first_attr(&document, AUTHOR_META_SELECTORS);
        }

        if text.is_empty() {
            for raw in CONTENT_SELECTORS {
                if let Ok(selector) = Selector::parse(raw) {
                    if let Some(element) = document.select(&selector).next() {
                        let candidate = strip_html(&element.inner_html());
                        if candidate.chars().count() > MIN_CONTENT_CHARS {
                            text = candidate;
                            break;
                        }
                    }
                }
            }
        }

        if text.chars().count() < MIN_CONTENT_CHARS {
            let body = util::body_text(&document);
            if !body.is_empty() {
                text = body;
            }
        }

        let mut metrics = ArticleMetrics::default();
        scan_metrics(&document, &mut metrics);

        notes.push(VOLATILE_NOTE.to_string());
        if metrics.views.is_na() {
            notes.push(VIEWS_NOTE.to_string());
        }

        let word_count = count_words(&text);
        let excerpt = extract_excerpt(&text, EXCERPT_MAX_CHARS);

        ParsedArticle {
            meta: ArticleMeta {
                title: title.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                author: author.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                publish_time: publish_time.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                word_count,
            },
            metrics,
            content: ArticleContent { text, excerpt },
            notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_note() -> String {
        "这是一篇足够长的小红书笔记正文，用来通过内容长度检查。".repeat(4)
    }

    #[test]
    fn handles_both_note_domains() {
        let parser = XiaohongshuParser::new();
        assert!(parser.can_handle("https://www.xiaohongshu.com/explore/x"));
        assert!(parser.can_handle("http://xhslink.com/AbCdEf"));
        assert!(!parser.can_handle("https://mp.weixin.qq.com/s/abc"));
    }

    #[test]
    fn structured_data_fills_all_fields() {
        let html = format!(
            r#"<html><head>
                <script type="application/ld+json">
                {{"@type":"Article","headline":"结构化标题","author":{{"name":"小红薯"}},"datePublished":"2024-06-01","articleBody":"{}"}}
                </script>
            </head><body></body></html>"#,
            long_note()
        );
        let parsed = XiaohongshuParser::new().parse(&html);
        assert_eq!(parsed.meta.title, "结构化标题");
        assert_eq!(parsed.meta.author, "小红薯");
        assert_eq!(parsed.meta.publish_time, "2024-06-01");
        assert!(parsed.content.text.contains("小红书笔记正文"));
    }

    #[test]
    fn structured_author_may_be_a_plain_string() {
        let html = format!(
            r#"<html><head><script type="application/ld+json">
                {{"@type":"Article","headline":"t","author":"直接署名","articleBody":"{}"}}
            </script></head><body></body></html>"#,
            long_note()
        );
        let parsed = XiaohongshuParser::new().parse(&html);
        assert_eq!(parsed.meta.author, "直接署名");
    }

    #[test]
    fn non_article_structured_data_is_ignored() {
        let html = format!(
            r#"<html><head>
                <meta property="og:title" content="页面标题"/>
                <script type="application/ld+json">{{"@type":"WebPage","headline":"错误来源"}}</script>
            </head><body><div class="note-content">{}</div></body></html>"#,
            long_note()
        );
        let parsed = XiaohongshuParser::new().parse(&html);
        assert_eq!(parsed.meta.title, "页面标题");
        assert!(parsed.content.text.contains("小红书笔记正文"));
    }

    #[test]
    fn meta_tags_fill_gaps_independently() {
        let html = format!(
            r#"<html><head>
                <meta property="og:title" content="og标题"/>
                <meta name="author" content="meta作者"/>
            </head><body><div class="note-content">{}</div></body></html>"#,
            long_note()
        );
        let parsed = XiaohongshuParser::new().parse(&html);
        assert_eq!(parsed.meta.title, "og标题");
        assert_eq!(parsed.meta.author, "meta作者");
        assert_eq!(parsed.meta.publish_time, "N/A");
    }

    #[test]
    fn title_element_is_the_last_title_resort() {
        let html = format!(
            r#"<html><head><title>文档标题</title></head>
            <body><div class="content">{}</div></body></html>"#,
            long_note()
        );
        let parsed = XiaohongshuParser::new().parse(&html);
        assert_eq!(parsed.meta.title, "文档标题");
    }

    #[test]
    fn short_containers_are_rejected_for_longer_candidates() {
        let html = format!(
            r#"<html><body>
                <div class="note-content">太短</div>
                <div class="desc">{}</div>
            </body></html>"#,
            long_note()
        );
        let parsed = XiaohongshuParser::new().parse(&html);
        assert!(parsed.content.text.contains("小红书笔记正文"));
        assert!(!parsed.content.text.starts_with("太短"));
    }

    #[test]
    fn falls_back_to_whole_body() {
        let filler = "笔记".repeat(60);
        let html = format!("<html><body><main>{}</main></body></html>", filler);
        let parsed = XiaohongshuParser::new().parse(&html);
        assert!(parsed.content.text.contains("笔记"));
    }

    #[test]
    fn classifies_metrics_by_lexical_context() {
        let html = format!(
            r#"<html><body>
                <div class="note-content">{}</div>
                <div class="interact">赞 <span class="like-count">1024</span></div>
                <div class="interact">评论 <span class="comment-count">56</span></div>
                <div class="interact">收藏 <span class="collect-count">3456</span></div>
                <div class="interact">浏览 <span class="view-count">1.2万</span></div>
            </body></html>"#,
            long_note()
        );
        let parsed = XiaohongshuParser::new().parse(&html);
        assert_eq!(parsed.metrics.likes, MetricValue::Count(1024));
        assert_eq!(parsed.metrics.replies, MetricValue::Count(56));
        assert_eq!(parsed.metrics.collects, MetricValue::Count(3456));
        assert_eq!(parsed.metrics.views, MetricValue::Raw("1.2万".to_string()));
        // views were found, so only the volatility caveat remains
        assert_eq!(parsed.notes.len(), 1);
    }

    #[test]
    fn first_match_wins_per_category() {
        let html = format!(
            r#"<html><body>
                <div class="note-content">{}</div>
                <div>like <span class="count-a">7</span></div>
                <div>like <span class="count-b">9</span></div>
            </body></html>"#,
            long_note()
        );
        let parsed = XiaohongshuParser::new().parse(&html);
        assert_eq!(parsed.metrics.likes, MetricValue::Count(7));
    }

    #[test]
    fn notes_flag_volatile_markup_and_hidden_views() {
        let html = format!(
            r#"<html><body><div class="note-content">{}</div></body></html>"#,
            long_note()
        );
        let parsed = XiaohongshuParser::new().parse(&html);
        assert_eq!(parsed.notes.len(), 2);
        assert!(parsed.notes[0].contains("页面更新"));
        assert!(parsed.notes[1].contains("浏览量"));
    }
}
