/// Hard cap on how much article text goes into one prompt, in characters.
pub const PROMPT_TEXT_CAP: usize = 4000;

/// Builds the shared analysis instruction: language directive, truncated
/// source text, and the requirement to return exactly `keywords`, `tags`
/// and `summary` as a single JSON object.
pub fn build_prompt(text: &str, top_k: usize, language: &str) -> String {
    let lang_instruction = if language == "zh" {
        "请用中文回答"
    } else {
        "Please respond in English"
    };

    let truncated = text.chars().count() > PROMPT_TEXT_CAP;
    let body: String = if truncated {
        text.chars().take(PROMPT_TEXT_CAP).collect()
    } else {
        text.to_string()
    };
    let marker = if truncated { "...(内容已截断)" } else { "" };

    format!(
        "{lang_instruction}。请分析以下文章内容，提取关键信息：\n\n\
         文章内容：\n{body} {marker}\n\n\
         请以JSON格式返回以下内容：\n\
         1. keywords: 提取{top_k}个最重要的关键词（数组）\n\
         2. tags: 推荐3-5个主题标签（数组）\n\
         3. summary: 150-300字的内容摘要（字符串）\n\n\
         返回格式示例：\n\
         {{\n\
         \x20 \"keywords\": [\"关键词1\", \"关键词2\", ...],\n\
         \x20 \"tags\": [\"标签1\", \"标签2\", ...],\n\
         \x20 \"summary\": \"文章摘要...\"\n\
         }}\n\n\
         只返回JSON，不要包含其他说明文字。"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_language_instruction() {
        assert!(build_prompt("text", 12, "zh").contains("请用中文回答"));
        assert!(build_prompt("text", 12, "en").contains("Please respond in English"));
    }

    #[test]
    fn embeds_requested_keyword_count() {
        assert!(build_prompt("text", 8, "zh").contains("提取8个最重要的关键词"));
    }

    #[test]
    fn truncates_long_text_with_marker() {
        let long: String = "甲".repeat(PROMPT_TEXT_CAP + 500);
        let prompt = build_prompt(&long, 12, "zh");
        assert!(prompt.contains("...(内容已截断)"));
        let embedded = prompt.matches('甲').count();
        assert_eq!(embedded, PROMPT_TEXT_CAP);
    }

    #[test]
    fn short_text_passes_through_unmarked() {
        let prompt = build_prompt("一段短文", 12, "zh");
        assert!(prompt.contains("一段短文"));
        assert!(!prompt.contains("内容已截断"));
    }
}
