//! Agent workspace discovery.
//!
//! Two layouts are recognized under the base directory:
//!
//! ```text
//! <base>/workspace-<agent>/IDENTITY.md          top-level workspaces
//! <base>/workspaces/<group>/<agent>/IDENTITY.md nested workspaces
//! ```
//!
//! Top-level directories must pass [`AgentCriteria::allows`]; nested ones
//! only need an identity document.

use std::path::Path;

use clawdocs_types::{AgentCriteria, AgentRecord};

use crate::identity::parse_identity;
use crate::report::{ScanReport, SkipReason, dir_name, is_plain_segment, subdirectories};
use crate::soul::{Soul, parse_soul};

pub const IDENTITY_FILE: &str = "IDENTITY.md";
pub const SOUL_FILE: &str = "SOUL.md";

/// How a candidate directory was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Discovery {
    TopLevel,
    Nested,
}

/// Scan `base` for agents.
pub fn scan_agents(base: &Path, criteria: &AgentCriteria) -> Vec<AgentRecord> {
    scan_agents_report(base, criteria).into_records()
}

/// Scan `base` for agents, keeping the reason for every excluded directory.
pub fn scan_agents_report(base: &Path, criteria: &AgentCriteria) -> ScanReport<AgentRecord> {
    let mut report = ScanReport::default();

    if !base.exists() {
        tracing::warn!(path = %base.display(), "Agents base path does not exist");
        return report;
    }

    let dirs = match subdirectories(base) {
        Ok(dirs) => dirs,
        Err(e) => {
            tracing::error!(path = %base.display(), "Failed to list agents base path: {e}");
            return report;
        }
    };

    for dir in dirs {
        let name = dir_name(&dir);
        if criteria.is_workspace(&name) {
            let outcome = scan_agent_dir(&dir, criteria, Discovery::TopLevel);
            report.push(dir, outcome);
        } else if criteria.is_nested_root(&name) {
            scan_nested_root(&dir, criteria, &mut report);
        } else {
            report.push(dir, Err(SkipReason::NotAgentDirectory));
        }
    }

    tracing::debug!(
        agents = report.records.len(),
        skipped = report.skipped.len(),
        "Scanned agents"
    );
    report
}

/// Walk `<root>/<group>/<agent>` directories.
fn scan_nested_root(root: &Path, criteria: &AgentCriteria, report: &mut ScanReport<AgentRecord>) {
    let groups = match subdirectories(root) {
        Ok(groups) => groups,
        Err(e) => {
            tracing::warn!(path = %root.display(), "Failed to list workspaces: {e}");
            return;
        }
    };

    for group in groups {
        let candidates = match subdirectories(&group) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %group.display(), "Failed to list workspace group: {e}");
                continue;
            }
        };
        for dir in candidates {
            let outcome = scan_agent_dir(&dir, criteria, Discovery::Nested);
            report.push(dir, outcome);
        }
    }
}

/// Look up one agent by directory name.
///
/// `<base>/<id>` is tried first; failing that, `<base>/<nested root>/<group>/<id>`.
pub fn get_agent(id: &str, base: &Path, criteria: &AgentCriteria) -> Option<AgentRecord> {
    if !is_plain_segment(id) {
        return None;
    }

    let direct = base.join(id);
    if direct.exists() {
        return scan_agent_dir(&direct, criteria, Discovery::TopLevel)
            .inspect_err(|reason| tracing::debug!(agent = id, "Agent lookup skipped: {reason}"))
            .ok();
    }

    for root in &criteria.nested_roots {
        let root_dir = base.join(root);
        if !root_dir.is_dir() {
            continue;
        }
        for group in subdirectories(&root_dir).unwrap_or_default() {
            let candidate = group.join(id);
            if !candidate.is_dir() {
                continue;
            }
            match scan_agent_dir(&candidate, criteria, Discovery::Nested) {
                Ok(agent) => return Some(agent),
                Err(reason) => tracing::debug!(agent = id, "Agent lookup skipped: {reason}"),
            }
        }
    }

    None
}

/// Build an agent record from one workspace directory.
fn scan_agent_dir(
    dir: &Path,
    criteria: &AgentCriteria,
    discovery: Discovery,
) -> Result<AgentRecord, SkipReason> {
    let id = dir_name(dir);

    let identity_path = dir.join(IDENTITY_FILE);
    if !identity_path.is_file() {
        return Err(SkipReason::MissingIdentity);
    }
    if discovery == Discovery::TopLevel && !criteria.allows(&id) {
        return Err(SkipReason::NameNotAllowed);
    }

    let identity = parse_identity(&read_document(&identity_path)?);

    let soul_path = dir.join(SOUL_FILE);
    let soul = if soul_path.is_file() {
        parse_soul(&read_document(&soul_path)?)
    } else {
        Soul::default()
    };

    tracing::debug!(agent = %id, name = %identity.name, "Loaded agent");

    Ok(AgentRecord {
        id,
        name: identity.name,
        role: identity.role,
        model: soul.model,
        description: soul.description,
    })
}

fn read_document(path: &Path) -> Result<String, SkipReason> {
    std::fs::read_to_string(path).map_err(|e| SkipReason::unreadable(path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    /// The fixture layout used by most tests.
    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();

        write(
            &base.join("workspace-test-agent-1/IDENTITY.md"),
            "---\nname: TestAgent1\nrole: Developer\nemoji: 🤖\n---\n\n# Test Agent 1\n",
        );
        write(
            &base.join("workspace-test-agent-1/SOUL.md"),
            "---\ndescription: A test agent for unit testing\n---\n\n# SOUL.md\n\nPrimary: gpt-4\n",
        );
        write(
            &base.join("workspace-test-agent-2/IDENTITY.md"),
            "# IDENTITY.md\n\n- **Name:** TestAgent2\n- **Creature:** AI Agent — Reviewer\n- **Emoji:** 🔍\n",
        );
        write(
            &base.join("workspace-test-agent-2/SOUL.md"),
            "# SOUL.md — TestAgent2\n\nPrimary: claude-3-opus\n",
        );
        write(
            &base.join("workspace-test-agent-3/IDENTITY.md"),
            "---\nname: TestAgent3\nrole: Minimal Agent\n---\n",
        );
        write(&base.join("not-an-agent/some-file.txt"), "not an agent");
        std::fs::create_dir_all(base.join("workspace-empty")).unwrap();
        dir
    }

    #[test]
    fn test_scan_finds_valid_agents() {
        let dir = fixture();
        let agents = scan_agents(dir.path(), &AgentCriteria::default());
        let ids: Vec<&str> = agents.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["workspace-test-agent-1", "workspace-test-agent-2", "workspace-test-agent-3"]
        );
    }

    #[test]
    fn test_frontmatter_agent() {
        let dir = fixture();
        let agents = scan_agents(dir.path(), &AgentCriteria::default());
        let agent = agents.iter().find(|a| a.id == "workspace-test-agent-1").unwrap();
        assert_eq!(agent.name, "TestAgent1");
        assert_eq!(agent.role, "Developer");
        assert_eq!(agent.model, "gpt-4");
        assert_eq!(agent.description, "A test agent for unit testing");
    }

    #[test]
    fn test_inline_agent() {
        let dir = fixture();
        let agent = get_agent("workspace-test-agent-2", dir.path(), &AgentCriteria::default())
            .unwrap();
        assert_eq!(agent.name, "TestAgent2");
        assert!(agent.role.contains("Reviewer"));
        assert_eq!(agent.model, "claude-3-opus");
        assert_eq!(agent.description, "");
    }

    #[test]
    fn test_missing_soul_yields_empty_fields() {
        let dir = fixture();
        let agent = get_agent("workspace-test-agent-3", dir.path(), &AgentCriteria::default())
            .unwrap();
        assert_eq!(agent.name, "TestAgent3");
        assert_eq!(agent.model, "");
        assert_eq!(agent.description, "");
    }

    #[test]
    fn test_skip_reasons() {
        let dir = fixture();
        let report = scan_agents_report(dir.path(), &AgentCriteria::default());
        assert_eq!(
            report.skip_reason(&dir.path().join("not-an-agent")),
            Some(&SkipReason::NotAgentDirectory)
        );
        assert_eq!(
            report.skip_reason(&dir.path().join("workspace-empty")),
            Some(&SkipReason::MissingIdentity)
        );
    }

    #[test]
    fn test_missing_base_path() {
        let report = scan_agents_report(
            Path::new("/non-existent-path/clawdocs"),
            &AgentCriteria::default(),
        );
        assert!(report.records.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_scan_is_idempotent() {
        let dir = fixture();
        let criteria = AgentCriteria::default();
        assert_eq!(
            scan_agents(dir.path(), &criteria),
            scan_agents(dir.path(), &criteria)
        );
    }

    #[test]
    fn test_nested_workspaces() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        write(
            &base.join("workspaces/feature-flow/planner/IDENTITY.md"),
            "**Name:** Planner\n",
        );
        write(&base.join("workspace/review-flow/checker/IDENTITY.md"), "---\nname: Checker\n---\n");
        write(&base.join("workspaces/feature-flow/notes/README.md"), "notes");

        let report = scan_agents_report(base, &AgentCriteria::default());
        let ids: Vec<&str> = report.records.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["checker", "planner"]);
        assert_eq!(
            report.skip_reason(&base.join("workspaces/feature-flow/notes")),
            Some(&SkipReason::MissingIdentity)
        );

        let planner = get_agent("planner", base, &AgentCriteria::default()).unwrap();
        assert_eq!(planner.name, "Planner");
        let checker = get_agent("checker", base, &AgentCriteria::default()).unwrap();
        assert_eq!(checker.name, "Checker");
    }

    #[test]
    fn test_lookup_applies_allow_list() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        write(&base.join("code-reviewer/IDENTITY.md"), "**Name:** Rex\n");
        write(&base.join("random/IDENTITY.md"), "**Name:** Nobody\n");

        let criteria = AgentCriteria::default();
        assert_eq!(get_agent("code-reviewer", base, &criteria).unwrap().name, "Rex");
        assert!(get_agent("random", base, &criteria).is_none());

        let custom = AgentCriteria {
            name_contains: vec!["random".into()],
            ..AgentCriteria::default()
        };
        assert!(get_agent("random", base, &custom).is_some());
    }

    #[test]
    fn test_custom_prefix() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("agent-alpha/IDENTITY.md"), "**Name:** Alpha\n");
        let criteria = AgentCriteria {
            workspace_prefix: "agent-".into(),
            ..AgentCriteria::default()
        };
        let agents = scan_agents(dir.path(), &criteria);
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].name, "Alpha");
    }

    #[test]
    fn test_get_agent_not_found() {
        let dir = fixture();
        assert!(get_agent("non-existent-agent", dir.path(), &AgentCriteria::default()).is_none());
    }

    #[test]
    fn test_get_agent_rejects_traversal() {
        let dir = fixture();
        let nested: PathBuf = dir.path().join("workspace-test-agent-1");
        let criteria = AgentCriteria::default();
        assert!(get_agent("..", &nested, &criteria).is_none());
        assert!(get_agent("../workspace-test-agent-1", &nested, &criteria).is_none());
        assert!(get_agent("", dir.path(), &criteria).is_none());
    }

    #[test]
    fn test_unreadable_identity_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let agent = dir.path().join("workspace-binary");
        std::fs::create_dir_all(&agent).unwrap();
        std::fs::write(agent.join("IDENTITY.md"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
        write(&dir.path().join("workspace-ok/IDENTITY.md"), "**Name:** Ok\n");

        let report = scan_agents_report(dir.path(), &AgentCriteria::default());
        assert_eq!(report.records.len(), 1);
        assert!(matches!(
            report.skip_reason(&agent),
            Some(SkipReason::Unreadable { .. })
        ));
    }

    #[test]
    fn test_every_scanned_agent_resolves() {
        let dir = fixture();
        let criteria = AgentCriteria::default();
        for agent in scan_agents(dir.path(), &criteria) {
            assert_eq!(get_agent(&agent.id, dir.path(), &criteria), Some(agent));
        }
    }
}
