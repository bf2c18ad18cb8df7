use lazy_static::lazy_static;
use regex::Regex;

/// Default cap on excerpt length, in visible characters.
pub const EXCERPT_MAX_CHARS: usize = 200;

lazy_static! {
    static ref SCRIPT_RE: Regex = Regex::new(r"(?is)<script\b[^>]*>.*?</script>").unwrap();
    static ref STYLE_RE: Regex = Regex::new(r"(?is)<style\b[^>]*>.*?</style>").unwrap();
    static ref TAG_RE: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// Reduces markup to plain text: script and style blocks go first (with
/// their contents), then remaining tags, then the six common entities are
/// decoded and whitespace runs collapse to single spaces.
///
/// Entity decoding happens after tag removal so decoded `&lt;`/`&gt;`
/// never read as tags. Never fails; malformed input degrades to some
/// string, possibly empty.
pub fn strip_html(markup: &str) -> String {
    let without_scripts = SCRIPT_RE.replace_all(markup, "");
    let without_styles = STYLE_RE.replace_all(&without_scripts, "");
    let without_tags = TAG_RE.replace_all(&without_styles, "");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");
    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

/// Heuristic word count: one per CJK ideograph, one per contiguous run of
/// ASCII letters. Not a linguistic tokenizer.
pub fn count_words(text: &str) -> u32 {
    let mut count = 0u32;
    let mut in_latin_run = false;
    for c in text.chars() {
        if ('\u{4e00}'..='\u{9fa5}').contains(&c) {
            count += 1;
            in_latin_run = false;
        } else if c.is_ascii_alphabetic() {
            if !in_latin_run {
                count += 1;
                in_latin_run = true;
            }
        } else {
            in_latin_run = false;
        }
    }
    count
}

/// Whitespace-collapsed prefix of `text`, at most `max_chars` visible
/// characters, with a trailing ellipsis only when the source exceeded the
/// limit.
pub fn extract_excerpt(text: &str, max_chars: usize) -> String {
    let cleaned = WHITESPACE_RE.replace_all(text.trim(), " ").to_string();
    if cleaned.chars().count() <= max_chars {
        return cleaned;
    }
    let prefix: String = cleaned.chars().take(max_chars).collect();
    format!("{}...", prefix)
}
