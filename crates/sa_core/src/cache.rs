use sha2::{Digest, Sha256};

/// Derives a stable fingerprint for one analysis request. Not consulted
/// by the pipeline itself; an external caching layer can key on it.
pub fn cache_key(url: &str, provider: &str, model: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hasher.update(provider.as_bytes());
    hasher.update(model.as_bytes());
    let digest = hasher.finalize();
    let hex = format!("{:x}", digest);
    format!("analysis:{}", &hex[..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_stable_and_prefixed() {
        let a = cache_key("https://mp.weixin.qq.com/s/abc", "deepseek", "deepseek-chat");
        let b = cache_key("https://mp.weixin.qq.com/s/abc", "deepseek", "deepseek-chat");
        assert_eq!(a, b);
        assert!(a.starts_with("analysis:"));
    }

    #[test]
    fn key_varies_with_every_input() {
        let base = cache_key("u", "p", "m");
        assert_ne!(base, cache_key("u2", "p", "m"));
        assert_ne!(base, cache_key("u", "p2", "m"));
        assert_ne!(base, cache_key("u", "p", "m2"));
    }
}
