//! Skill discovery, parsing, and system/user merging.

use std::collections::HashMap;
use std::path::Path;

use serde_json::{Map, Value};

use clawdocs_types::{SkillMetadata, SkillRecord};

use crate::extract::{FieldSource, resolve, truncate_chars};
use crate::frontmatter::{scalar_to_string, split};
use crate::report::{ScanReport, SkipReason, dir_name, is_plain_segment, subdirectories};

pub const SKILL_FILE: &str = "SKILL.md";

const DESCRIPTION_MAX_CHARS: usize = 300;
const DESCRIPTION_MAX_LINES: usize = 2;

/// Parse one `SKILL.md` file.
///
/// The parent directory names the skill when the frontmatter does not.
pub fn parse_skill_file(path: &Path) -> Result<SkillRecord, SkipReason> {
    let skill_dir = path.parent().unwrap_or(Path::new(""));
    let id = dir_name(skill_dir);

    let content = std::fs::read_to_string(path).map_err(|e| SkipReason::unreadable(path, &e))?;
    let (fm, body) = split(&content);

    let name = fm.get_str("name").unwrap_or_else(|| id.clone());
    let description = resolve(
        &[
            FieldSource::Frontmatter("description"),
            FieldSource::Body(leading_paragraph),
        ],
        &fm,
        &body,
    )
    .unwrap_or_default();
    let metadata = fm.get_map("metadata").map(skill_metadata).unwrap_or_default();

    tracing::debug!(skill = %name, path = %path.display(), "Loaded skill");

    Ok(SkillRecord {
        id,
        name,
        description,
        location: skill_dir.to_string_lossy().into_owned(),
        metadata,
    })
}

/// Up to two consecutive text lines from the first paragraph, skipping headings.
fn leading_paragraph(body: &str) -> Option<String> {
    let mut lines: Vec<&str> = Vec::new();
    for line in body.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            if !lines.is_empty() {
                break;
            }
            continue;
        }
        lines.push(line);
        if lines.len() >= DESCRIPTION_MAX_LINES {
            break;
        }
    }

    if lines.is_empty() {
        return None;
    }
    Some(truncate_chars(&lines.join(" "), DESCRIPTION_MAX_CHARS))
}

/// Typed view of the frontmatter `metadata` mapping.
fn skill_metadata(map: &Map<String, Value>) -> SkillMetadata {
    let mut meta = SkillMetadata::default();
    for (key, value) in map {
        match key.as_str() {
            "version" => meta.version = scalar_to_string(value),
            "author" => meta.author = scalar_to_string(value),
            "tags" => meta.tags = string_list(value),
            _ => {
                meta.extra.insert(key.clone(), value.clone());
            }
        }
    }
    meta
}

/// A YAML list of scalars, or a comma-separated string.
fn string_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(items.iter().filter_map(scalar_to_string).collect()),
        Value::String(s) => Some(
            s.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
        ),
        _ => None,
    }
}

/// Scan one skills root: every subdirectory holding a `SKILL.md`.
pub fn scan_skill_dir(root: &Path) -> ScanReport<SkillRecord> {
    let mut report = ScanReport::default();

    if !root.exists() {
        tracing::warn!(path = %root.display(), "Skills path does not exist");
        return report;
    }

    let dirs = match subdirectories(root) {
        Ok(dirs) => dirs,
        Err(e) => {
            tracing::error!(path = %root.display(), "Failed to list skills directory: {e}");
            return report;
        }
    };

    for dir in dirs {
        let skill_file = dir.join(SKILL_FILE);
        let outcome = if skill_file.is_file() {
            parse_skill_file(&skill_file)
        } else {
            Err(SkipReason::MissingSkillFile)
        };
        report.push(dir, outcome);
    }

    report
}

/// Scan both roots and merge them; user skills win on name collisions.
pub fn scan_skills(system_root: &Path, user_root: &Path) -> Vec<SkillRecord> {
    scan_skills_report(system_root, user_root).into_records()
}

/// Like [`scan_skills`], keeping the skip reasons of both roots.
pub fn scan_skills_report(system_root: &Path, user_root: &Path) -> ScanReport<SkillRecord> {
    let system = scan_skill_dir(system_root);
    let user = scan_skill_dir(user_root);

    let mut skipped = system.skipped;
    skipped.extend(user.skipped);

    let records = merge_skills(system.records, user.records);
    tracing::debug!(skills = records.len(), "Scanned skills");

    ScanReport { records, skipped }
}

/// Merge keyed by `name`.
///
/// System records go in first; a user record replaces the entry of the same
/// name in place (tagged `user:`), new names are appended.
pub fn merge_skills(system: Vec<SkillRecord>, user: Vec<SkillRecord>) -> Vec<SkillRecord> {
    let mut merged: Vec<SkillRecord> = Vec::with_capacity(system.len() + user.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    let all = system
        .into_iter()
        .chain(user.into_iter().map(SkillRecord::into_user));
    for skill in all {
        match index.get(&skill.name) {
            Some(&pos) => merged[pos] = skill,
            None => {
                index.insert(skill.name.clone(), merged.len());
                merged.push(skill);
            }
        }
    }

    merged
}

/// Look up a skill by directory name, user root first.
///
/// When no directory matches, the merged scan is searched by skill name so
/// that every name listed by [`scan_skills`] resolves.
pub fn get_skill(name: &str, system_root: &Path, user_root: &Path) -> Option<SkillRecord> {
    if !is_plain_segment(name) {
        return None;
    }

    let user_file = user_root.join(name).join(SKILL_FILE);
    if user_file.is_file() {
        match parse_skill_file(&user_file) {
            Ok(skill) => return Some(skill.into_user()),
            Err(reason) => tracing::warn!(skill = name, "User skill unusable: {reason}"),
        }
    }

    let system_file = system_root.join(name).join(SKILL_FILE);
    if system_file.is_file() {
        match parse_skill_file(&system_file) {
            Ok(skill) => return Some(skill),
            Err(reason) => tracing::warn!(skill = name, "System skill unusable: {reason}"),
        }
    }

    scan_skills(system_root, user_root)
        .into_iter()
        .find(|skill| skill.name == name)
}
