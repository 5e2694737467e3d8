use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use clawdocs_types::AgentCriteria;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON5 parse error: {0}")]
    Json5(#[from] json5::Error),
    #[error("Config directory not found")]
    NoDirFound,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Built dashboard UI to serve alongside the API (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

fn default_port() -> u16 {
    4504
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            static_dir: None,
        }
    }
}

/// Where agent workspaces live and how they are recognized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentScanConfig {
    #[serde(default = "default_agents_path")]
    pub base_path: PathBuf,
    #[serde(flatten)]
    pub criteria: AgentCriteria,
}

fn default_agents_path() -> PathBuf {
    PathBuf::from("~/.openclaw")
}

impl Default for AgentScanConfig {
    fn default() -> Self {
        Self {
            base_path: default_agents_path(),
            criteria: AgentCriteria::default(),
        }
    }
}

/// The two skill roots; the user root wins on name collisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillScanConfig {
    #[serde(default = "default_system_skills")]
    pub system_path: PathBuf,
    #[serde(default = "default_user_skills")]
    pub user_path: PathBuf,
}

fn default_system_skills() -> PathBuf {
    PathBuf::from("/usr/lib/node_modules/openclaw/skills")
}

fn default_user_skills() -> PathBuf {
    PathBuf::from("~/.openclaw/skills")
}

impl Default for SkillScanConfig {
    fn default() -> Self {
        Self {
            system_path: default_system_skills(),
            user_path: default_user_skills(),
        }
    }
}

/// Top-level clawdocs configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClawDocsConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub agents: AgentScanConfig,
    #[serde(default)]
    pub skills: SkillScanConfig,
}

impl ClawDocsConfig {
    /// Apply `CLAWDOCS_*` overrides read through `lookup`.
    ///
    /// Invalid port values are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("CLAWDOCS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("CLAWDOCS_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid CLAWDOCS_PORT value: {port}"),
            }
        }
        if let Some(dir) = lookup("CLAWDOCS_STATIC_DIR") {
            self.server.static_dir = Some(PathBuf::from(dir));
        }
        if let Some(path) = lookup("CLAWDOCS_AGENTS_PATH") {
            self.agents.base_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("CLAWDOCS_SYSTEM_SKILLS") {
            self.skills.system_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("CLAWDOCS_USER_SKILLS") {
            self.skills.user_path = PathBuf::from(path);
        }
    }

    /// Defaults with `CLAWDOCS_*` overrides from `lookup` and `~/` expanded.
    pub fn from_defaults<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_overrides(lookup);
        config.expand_home();
        config
    }

    /// Expand a leading `~/` in every configured path.
    pub fn expand_home(&mut self) {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        self.expand_home_with(&home);
    }

    fn expand_home_with(&mut self, home: &Path) {
        let expand = |p: &mut PathBuf| {
            if let Ok(rest) = p.strip_prefix("~") {
                *p = home.join(rest);
            }
        };
        expand(&mut self.agents.base_path);
        expand(&mut self.skills.system_path);
        expand(&mut self.skills.user_path);
        if let Some(dir) = self.server.static_dir.as_mut() {
            expand(dir);
        }
    }
}

/// Resolve the clawdocs config directory (~/.clawdocs/).
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|h| h.join(".clawdocs"))
        .ok_or(ConfigError::NoDirFound)
}

/// Resolve the config file path (~/.clawdocs/config.json5).
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.json5"))
}

/// Load configuration from the default path, falling back to defaults.
pub fn load_config() -> Result<ClawDocsConfig, ConfigError> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let path = config_file_path()?;
    load_config_from(&path)
}

/// Load configuration from a specific path, falling back to defaults if not found.
///
/// Environment overrides are applied and `~/` is expanded afterwards.
pub fn load_config_from(path: &Path) -> Result<ClawDocsConfig, ConfigError> {
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path)?;
        json5::from_str(&content)?
    } else {
        tracing::debug!("Config file not found at {}, using defaults", path.display());
        ClawDocsConfig::default()
    };

    config.apply_overrides(|key| std::env::var(key).ok());
    config.expand_home();
    Ok(config)
}
