//! Per-item scan outcomes.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Why a directory did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("not an agent directory")]
    NotAgentDirectory,
    #[error("name does not match the agent allow-list")]
    NameNotAllowed,
    #[error("no IDENTITY.md")]
    MissingIdentity,
    #[error("no SKILL.md")]
    MissingSkillFile,
    #[error("failed to read {}: {message}", .path.display())]
    Unreadable { path: PathBuf, message: String },
}

impl SkipReason {
    pub(crate) fn unreadable(path: &Path, err: &std::io::Error) -> Self {
        Self::Unreadable {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// A directory excluded from a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Records produced by a scan, plus everything that was left out and why.
#[derive(Debug, Clone)]
pub struct ScanReport<T> {
    pub records: Vec<T>,
    pub skipped: Vec<Skipped>,
}

impl<T> Default for ScanReport<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T> ScanReport<T> {
    /// Record the outcome for one directory.
    pub(crate) fn push(&mut self, path: PathBuf, outcome: Result<T, SkipReason>) {
        match outcome {
            Ok(record) => self.records.push(record),
            Err(reason) => {
                if matches!(reason, SkipReason::Unreadable { .. }) {
                    tracing::warn!(path = %path.display(), "Skipping: {reason}");
                } else {
                    tracing::trace!(path = %path.display(), "Skipping: {reason}");
                }
                self.skipped.push(Skipped { path, reason });
            }
        }
    }

    /// The reason `path` was skipped, if it was.
    pub fn skip_reason(&self, path: &Path) -> Option<&SkipReason> {
        self.skipped
            .iter()
            .find(|s| s.path == path)
            .map(|s| &s.reason)
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

/// Immediate subdirectories of `dir`, sorted by name.
pub(crate) fn subdirectories(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = std::fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// Final path component as a string.
pub(crate) fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Whether `name` is a single plain path component (no `..`, no separators).
pub(crate) fn is_plain_segment(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}
