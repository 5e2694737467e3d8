//! SOUL.md extraction: model and short description.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::{FieldSource, resolve, truncate_chars};
use crate::frontmatter::split;

static PRIMARY_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Primary:\s*(.+)").unwrap());
// Also matches inside `**Model:** x`, so a closing `**` is skipped.
static MODEL_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Model:\s*(?:\*\*)?\s*(.+)").unwrap());
static BOLD_MODEL_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\*\*Model:\*\*\s*(.+)").unwrap());

const DESCRIPTION_MAX_CHARS: usize = 200;

/// Fields read from a soul document. Both default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Soul {
    pub model: String,
    pub description: String,
}

/// Parse a soul document.
pub fn parse_soul(content: &str) -> Soul {
    let (fm, body) = split(content);

    let model = [
        FieldSource::Frontmatter("model"),
        FieldSource::Pattern(&PRIMARY_LINE),
        FieldSource::Pattern(&MODEL_LINE),
        FieldSource::Pattern(&BOLD_MODEL_LINE),
    ];
    let description = [
        FieldSource::Frontmatter("description"),
        FieldSource::Body(opening_paragraph_line),
    ];

    Soul {
        model: resolve(&model, &fm, &body).unwrap_or_default(),
        description: resolve(&description, &fm, &body).unwrap_or_default(),
    }
}

/// First line of the paragraph that follows the body's leading blank line.
///
/// Nothing is taken when the body does not open with a blank line, or when
/// the first text after it is a heading.
fn opening_paragraph_line(body: &str) -> Option<String> {
    let text = body.trim_start();
    let indent = &body[..body.len() - text.len()];
    let start = indent.rfind('\n')? + 1;

    let line = body[start..].lines().next()?.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(truncate_chars(line, DESCRIPTION_MAX_CHARS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontmatter_soul() {
        let soul = parse_soul(
            "---\nmodel: gpt-4\ndescription: A test agent for unit testing\n---\n\n# SOUL.md\n\nPrimary: other\n",
        );
        assert_eq!(soul.model, "gpt-4");
        assert_eq!(soul.description, "A test agent for unit testing");
    }

    #[test]
    fn test_primary_line() {
        let soul = parse_soul("# SOUL.md — Sentinel\n\nPrimary: claude-3-opus\n");
        assert_eq!(soul.model, "claude-3-opus");
    }

    #[test]
    fn test_primary_is_case_insensitive() {
        let soul = parse_soul("## Models\nprimary:  kimi-coding/k2p5 \n");
        assert_eq!(soul.model, "kimi-coding/k2p5");
    }

    #[test]
    fn test_bold_model_line() {
        let soul = parse_soul("# Soul\n\n- **Model:** gpt-4o\n");
        assert_eq!(soul.model, "gpt-4o");
    }

    #[test]
    fn test_plain_model_line() {
        let soul = parse_soul("# Soul\n\nmodel: llama-3\n");
        assert_eq!(soul.model, "llama-3");
    }

    #[test]
    fn test_first_model_line_wins() {
        let soul = parse_soul("Model: a\n\n- **Model:** b\n");
        assert_eq!(soul.model, "a");
    }

    #[test]
    fn test_primary_preferred_over_model() {
        let soul = parse_soul("Model: fallback\nPrimary: main\n");
        assert_eq!(soul.model, "main");
    }

    #[test]
    fn test_description_needs_leading_blank_line() {
        let soul = parse_soul("# SOUL.md — TestAgent2\n\nPrimary: claude-3-opus\n");
        assert_eq!(soul.description, "");

        let soul = parse_soul("Calm reviewer of code.\n");
        assert_eq!(soul.description, "");
    }

    #[test]
    fn test_description_not_taken_from_heading() {
        let soul = parse_soul("\n## Who\n\nCalm reviewer of code.\n");
        assert_eq!(soul.description, "");
    }

    #[test]
    fn test_description_is_first_line_of_paragraph() {
        let soul = parse_soul("\n\n  Calm reviewer of code.\nSecond line.\n\nMore.\n");
        assert_eq!(soul.description, "Calm reviewer of code.");
    }

    #[test]
    fn test_description_after_leading_blank_line() {
        let soul = parse_soul("---\nmodel: x\n---\n\nThis is a test agent description.\n");
        assert_eq!(soul.description, "This is a test agent description.");
    }

    #[test]
    fn test_description_truncated() {
        let long = "x".repeat(250);
        let soul = parse_soul(&format!("\n{long}\n"));
        assert_eq!(soul.description.chars().count(), 200);
    }

    #[test]
    fn test_nothing_found() {
        assert_eq!(parse_soul("# Only a heading\n"), Soul::default());
        assert_eq!(parse_soul(""), Soul::default());
        assert_eq!(parse_soul("\n\n   \n").description, "");
    }
}
