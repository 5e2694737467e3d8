use std::io::Write;

use anyhow::{Result, bail};
use serde::Serialize;

use clawdocs_config::ClawDocsConfig;
use clawdocs_scanner::Skipped;

/// Print agents (or a single agent) as pretty JSON.
pub fn run_agents(config: &ClawDocsConfig, id: Option<&str>, show_skipped: bool) -> Result<()> {
    let base = &config.agents.base_path;
    let criteria = &config.agents.criteria;
    let mut out = std::io::stdout().lock();

    if let Some(id) = id {
        let Some(agent) = clawdocs_scanner::get_agent(id, base, criteria) else {
            bail!("No agent found with ID: {id}");
        };
        return write_json(&mut out, &agent);
    }

    let report = clawdocs_scanner::scan_agents_report(base, criteria);
    if show_skipped {
        write_skipped(&mut std::io::stderr().lock(), &report.skipped)?;
    }
    write_json(&mut out, &report.records)
}

/// Print merged skills (or a single skill) as pretty JSON.
pub fn run_skills(config: &ClawDocsConfig, name: Option<&str>, show_skipped: bool) -> Result<()> {
    let system = &config.skills.system_path;
    let user = &config.skills.user_path;
    let mut out = std::io::stdout().lock();

    if let Some(name) = name {
        let Some(skill) = clawdocs_scanner::get_skill(name, system, user) else {
            bail!("No skill found with name: {name}");
        };
        return write_json(&mut out, &skill);
    }

    let report = clawdocs_scanner::scan_skills_report(system, user);
    if show_skipped {
        write_skipped(&mut std::io::stderr().lock(), &report.skipped)?;
    }
    write_json(&mut out, &report.records)
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_skipped(out: &mut impl Write, skipped: &[Skipped]) -> Result<()> {
    for item in skipped {
        writeln!(out, "skipped {}: {}", item.path.display(), item.reason)?;
    }
    Ok(())
}
