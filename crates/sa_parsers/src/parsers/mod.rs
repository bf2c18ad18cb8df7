use sa_core::types::ParsedArticle;

pub mod wechat;
pub mod xiaohongshu;

pub use wechat::WechatParser;
pub use xiaohongshu::XiaohongshuParser;

/// Turns raw page markup into a structured article.
pub trait ArticleParser: Send + Sync {
    /// Returns true if this parser understands the given URL.
    fn can_handle(&self, url: &str) -> bool;

    /// Best-effort extraction: unrecoverable fields degrade to sentinels
    /// and an explanatory note instead of failing.
    fn parse(&self, html: &str) -> ParsedArticle;
}

/// Walks the registered parsers in order and returns the first that
/// claims the URL. `None` is a valid outcome for unsupported domains.
pub fn parser_for(url: &str) -> Option<Box<dyn ArticleParser>> {
    let parsers: Vec<Box<dyn ArticleParser>> = vec![
        Box::new(WechatParser::new()),
        Box::new(XiaohongshuParser::new()),
    ];
    parsers.into_iter().find(|p| p.can_handle(url))
}

/// Common selector helpers for parsers.
pub(crate) mod util {
    use sa_core::text::strip_html;
    use scraper::{Html, Selector};

    /// Tries each selector in order; the first element whose stripped
    /// text is non-empty wins.
    pub fn first_text(document: &Html, selectors: &[&str]) -> Option<String> {
        for raw in selectors {
            if let Ok(selector) = Selector::parse(raw) {
                if let Some(element) = document.select(&selector).next() {
                    let text = strip_html(&element.inner_html());
                    if !text.is_empty() {
                        return Some(text);
                    }
                }
            }
        }
        None
    }

    /// Tries each (selector, attribute) pair in order; the first
    /// non-empty attribute value wins.
    pub fn first_attr(document: &Html, candidates: &[(&str, &str)]) -> Option<String> {
        for (raw, attr) in candidates {
            if let Ok(selector) = Selector::parse(raw) {
                if let Some(value) = document
                    .select(&selector)
                    .next()
                    .and_then(|el| el.value().attr(attr))
                {
                    let value = value.trim();
                    if !value.is_empty() {
                        return Some(value.to_string());
                    }
                }
            }
        }
        None
    }

    /// Strips the whole document body. Used when no recognizable content
    /// container is present and the page as a whole is the content.
    pub fn body_text(document: &Html) -> String {
        if let Ok(selector) = Selector::parse("body") {
            if let Some(body) = document.select(&selector).next() {
                return strip_html(&body.inner_html());
            }
        }
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn routing_is_first_match_by_domain() {
        assert!(parser_for("https://mp.weixin.qq.com/s/abc")
            .map(|p| p.can_handle("https://mp.weixin.qq.com/s/abc"))
            .unwrap_or(false));
        assert!(parser_for("https://www.xiaohongshu.com/explore/x").is_some());
        assert!(parser_for("http://xhslink.com/AbCdEf").is_some());
        assert!(parser_for("https://example.com/article").is_none());
    }

    #[test]
    fn first_text_respects_candidate_order() {
        let document = Html::parse_document(
            r#"<div id="secondary">fallback</div><div id="primary">preferred</div>"#,
        );
        assert_eq!(
            util::first_text(&document, &["#primary", "#secondary"]),
            Some("preferred".to_string())
        );
        assert_eq!(
            util::first_text(&document, &["#missing", "#secondary"]),
            Some("fallback".to_string())
        );
        assert_eq!(util::first_text(&document, &["#missing"]), None);
    }

    #[test]
    fn first_text_skips_empty_candidates() {
        let document =
            Html::parse_document(r#"<div id="empty">   </div><div id="full">value</div>"#);
        assert_eq!(
            util::first_text(&document, &["#empty", "#full"]),
            Some("value".to_string())
        );
    }

    #[test]
    fn first_attr_reads_meta_content() {
        let document = Html::parse_document(
            r#"<head><meta property="og:title" content="Og Title"/></head>"#,
        );
        assert_eq!(
            util::first_attr(&document, &[("meta[property=\"og:title\"]", "content")]),
            Some("Og Title".to_string())
        );
    }
}
