//! clawdocs-scanner: agent and skill discovery over documentation directories.
//!
//! Every call walks the filesystem fresh and returns fully materialized
//! records; nothing is cached and nothing is written.
//!
//! # Agent workspace
//!
//! ```text
//! workspace-coder/
//! ├── IDENTITY.md   name / role (or creature) / emoji
//! └── SOUL.md       model / description (optional)
//! ```
//!
//! # Skill file format
//!
//! ```markdown
//! ---
//! name: review-pr
//! description: Review a GitHub pull request
//! metadata:
//!   version: 1.2.0
//!   tags: [git, review]
//! ---
//!
//! # Review PR
//! ```
//!
//! Both document kinds may omit the frontmatter; fields then fall back to
//! markdown conventions in the body.

pub mod agents;
pub mod extract;
pub mod frontmatter;
pub mod identity;
pub mod report;
pub mod skills;
pub mod soul;

pub use agents::{get_agent, scan_agents, scan_agents_report};
pub use report::{ScanReport, SkipReason, Skipped};
pub use skills::{get_skill, merge_skills, parse_skill_file, scan_skill_dir, scan_skills, scan_skills_report};
