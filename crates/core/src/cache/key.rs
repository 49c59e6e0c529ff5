//! Cache key normalization.

/// Normalize a caller-supplied identifier into a cache key.
///
/// Trims whitespace, strips one leading `@` and lowercases the rest.
pub fn cache_key(identifier: &str) -> String {
    let trimmed = identifier.trim();
    let handle = trimmed.strip_prefix('@').unwrap_or(trimmed);
    handle.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_variants_collapse() {
        assert_eq!(cache_key("@Foo"), "foo");
        assert_eq!(cache_key("foo"), "foo");
        assert_eq!(cache_key(" Foo "), "foo");
        assert_eq!(cache_key("  @FOO"), "foo");
    }

    #[test]
    fn test_key_strips_single_at() {
        assert_eq!(cache_key("@@foo"), "@foo");
    }

    #[test]
    fn test_key_keeps_inner_punctuation() {
        assert_eq!(cache_key("@Boy.Throb"), "boy.throb");
    }

    #[test]
    fn test_key_empty() {
        assert_eq!(cache_key("   "), "");
        assert_eq!(cache_key("@"), "");
    }
}
