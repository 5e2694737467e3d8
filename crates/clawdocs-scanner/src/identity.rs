//! IDENTITY.md extraction.
//!
//! Identity documents come in two conventions: YAML frontmatter with a
//! `name` key, or free text with bold labels:
//!
//! ```markdown
//! - **Name:** Sentinel
//! - **Creature:** AI Agent — Reviewer
//! - **Emoji:** 🔍
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::{FieldSource, resolve};
use crate::frontmatter::split;

static NAME_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*Name:\*\*\s*(.+)").unwrap());
static CREATURE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*Creature:\*\*\s*(.+)").unwrap());
static EMOJI_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*Emoji:\*\*\s*(.+)").unwrap());

/// Name used when neither convention yields one.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Fields read from an identity document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub role: String,
    pub emoji: String,
}

/// Parse an identity document.
///
/// Frontmatter is authoritative when it carries a `name`; otherwise every
/// field comes from the bold-label lines of the body.
pub fn parse_identity(content: &str) -> Identity {
    let (fm, body) = split(content);

    if let Some(name) = fm.get_str("name") {
        let role = [FieldSource::Frontmatter("role"), FieldSource::Frontmatter("creature")];
        return Identity {
            name,
            role: resolve(&role, &fm, &body).unwrap_or_default(),
            emoji: resolve(&[FieldSource::Frontmatter("emoji")], &fm, &body).unwrap_or_default(),
        };
    }

    Identity {
        name: resolve(&[FieldSource::Pattern(&NAME_LINE)], &fm, &body)
            .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        role: resolve(&[FieldSource::Pattern(&CREATURE_LINE)], &fm, &body).unwrap_or_default(),
        emoji: resolve(&[FieldSource::Pattern(&EMOJI_LINE)], &fm, &body).unwrap_or_default(),
    }
}
