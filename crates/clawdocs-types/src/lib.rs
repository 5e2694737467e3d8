use serde::{Deserialize, Serialize};

/// Marker prepended to the `location` of skills found under the user root.
pub const USER_LOCATION_PREFIX: &str = "user:";

// ──────────────────── Agent Types ────────────────────

/// Naming rules deciding which directories are agent workspaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCriteria {
    /// Top-level directories starting with this prefix are scanned.
    #[serde(default = "default_workspace_prefix")]
    pub workspace_prefix: String,
    /// Directory names containing any of these are accepted as well.
    #[serde(default = "default_name_contains")]
    pub name_contains: Vec<String>,
    /// Container directories holding `<group>/<agent>` layouts.
    #[serde(default = "default_nested_roots")]
    pub nested_roots: Vec<String>,
}

fn default_workspace_prefix() -> String {
    "workspace-".to_string()
}

fn default_name_contains() -> Vec<String> {
    vec!["feature-dev".to_string(), "reviewer".to_string()]
}

fn default_nested_roots() -> Vec<String> {
    vec!["workspaces".to_string(), "workspace".to_string()]
}

impl Default for AgentCriteria {
    fn default() -> Self {
        Self {
            workspace_prefix: default_workspace_prefix(),
            name_contains: default_name_contains(),
            nested_roots: default_nested_roots(),
        }
    }
}

impl AgentCriteria {
    /// Whether a top-level directory name is a workspace candidate.
    pub fn is_workspace(&self, name: &str) -> bool {
        !self.workspace_prefix.is_empty() && name.starts_with(&self.workspace_prefix)
    }

    /// Allow-list applied to directories not reached through a nested root.
    pub fn allows(&self, name: &str) -> bool {
        self.is_workspace(name)
            || self
                .name_contains
                .iter()
                .any(|needle| !needle.is_empty() && name.contains(needle.as_str()))
    }

    pub fn is_nested_root(&self, name: &str) -> bool {
        self.nested_roots.iter().any(|root| root == name)
    }
}

/// An agent discovered on disk, normalized from its identity and soul documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRecord {
    /// Directory name of the agent workspace.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Role or "creature" description.
    pub role: String,
    /// Model identifier (e.g. "kimi-coding/k2p5"), empty when unknown.
    pub model: String,
    /// Short summary taken from the soul document, empty when unknown.
    pub description: String,
}

// ──────────────────── Skill Types ────────────────────

/// Optional metadata block of a skill definition.
///
/// Well-known keys are typed; everything else under the frontmatter
/// `metadata` mapping is passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Any other keys (e.g. `emoji`, `openclaw`).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SkillMetadata {
    pub fn is_empty(&self) -> bool {
        self.version.is_none()
            && self.author.is_none()
            && self.tags.is_none()
            && self.extra.is_empty()
    }
}

/// A skill discovered on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    /// Directory name of the skill.
    pub id: String,
    /// Skill name; the de-duplication key across skill roots.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Skill directory, prefixed with `user:` when it came from the user root.
    pub location: String,
    #[serde(default)]
    pub metadata: SkillMetadata,
}

impl SkillRecord {
    /// Whether this record came from the user skill root.
    pub fn is_user(&self) -> bool {
        self.location.starts_with(USER_LOCATION_PREFIX)
    }

    /// The filesystem path of the skill directory, without the `user:` marker.
    pub fn directory(&self) -> &str {
        strip_user_marker(&self.location)
    }

    /// Tag this record as coming from the user root.
    pub fn into_user(mut self) -> Self {
        if !self.is_user() {
            self.location = format!("{USER_LOCATION_PREFIX}{}", self.location);
        }
        self
    }
}

/// Remove a leading `user:` marker from a skill location.
pub fn strip_user_marker(location: &str) -> &str {
    location
        .strip_prefix(USER_LOCATION_PREFIX)
        .unwrap_or(location)
}
