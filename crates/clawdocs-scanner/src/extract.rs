//! Ordered field-extraction chains.
//!
//! A field is resolved by trying each [`FieldSource`] in turn until one
//! yields a non-empty value.

use regex::Regex;

use crate::frontmatter::Frontmatter;

/// One way of finding a field value in a document.
#[derive(Clone, Copy)]
pub enum FieldSource {
    /// A scalar frontmatter key.
    Frontmatter(&'static str),
    /// First capture group of the first match in the body.
    Pattern(&'static Regex),
    /// Arbitrary body scan.
    Body(fn(&str) -> Option<String>),
}

impl FieldSource {
    pub fn extract(&self, frontmatter: &Frontmatter, body: &str) -> Option<String> {
        match self {
            Self::Frontmatter(key) => frontmatter.get_str(key),
            Self::Pattern(re) => re
                .captures(body)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
                .filter(|s| !s.is_empty()),
            Self::Body(scan) => scan(body),
        }
    }
}

impl std::fmt::Debug for FieldSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Frontmatter(key) => f.debug_tuple("Frontmatter").field(key).finish(),
            Self::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            Self::Body(_) => f.write_str("Body(..)"),
        }
    }
}

/// Resolve a field through `chain`, returning the first hit.
pub fn resolve(chain: &[FieldSource], frontmatter: &Frontmatter, body: &str) -> Option<String> {
    chain
        .iter()
        .find_map(|source| source.extract(frontmatter, body))
}

/// Truncate to at most `max` characters.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::split;
    use once_cell::sync::Lazy;

    static OWNER: Lazy<Regex> = Lazy::new(|| Regex::new(r"Owner:\s*(.+)").unwrap());

    fn first_word(body: &str) -> Option<String> {
        body.split_whitespace().next().map(String::from)
    }

    #[test]
    fn test_frontmatter_wins_over_pattern() {
        let (fm, body) = split("---\nowner: alice\n---\nOwner: bob\n");
        let chain = [FieldSource::Frontmatter("owner"), FieldSource::Pattern(&OWNER)];
        assert_eq!(resolve(&chain, &fm, &body).as_deref(), Some("alice"));
    }

    #[test]
    fn test_falls_through_to_pattern() {
        let (fm, body) = split("# Doc\n\nOwner:   bob  \n");
        let chain = [FieldSource::Frontmatter("owner"), FieldSource::Pattern(&OWNER)];
        assert_eq!(resolve(&chain, &fm, &body).as_deref(), Some("bob"));
    }

    #[test]
    fn test_body_scanner_and_miss() {
        let (fm, body) = split("hello world");
        assert_eq!(
            resolve(&[FieldSource::Body(first_word)], &fm, &body).as_deref(),
            Some("hello")
        );
        assert_eq!(resolve(&[FieldSource::Pattern(&OWNER)], &fm, &body), None);
        assert_eq!(resolve(&[], &fm, &body), None);
    }

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("ab", 10), "ab");
    }
}
