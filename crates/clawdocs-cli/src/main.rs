mod inspect;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use clawdocs_config::ClawDocsConfig;

#[derive(Parser)]
#[command(name = "clawdocs", about = "Browse agent and skill documentation")]
struct Cli {
    /// Config file (default: ~/.clawdocs/config.json5)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding agent workspaces (overrides config)
    #[arg(long, global = true)]
    agents_path: Option<PathBuf>,

    /// System skills directory (overrides config)
    #[arg(long, global = true)]
    system_skills: Option<PathBuf>,

    /// User skills directory (overrides config)
    #[arg(long, global = true)]
    user_skills: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Built dashboard UI to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Print scanned agents as JSON
    Agents {
        /// Print only this agent
        #[arg(long)]
        id: Option<String>,

        /// List excluded directories and why on stderr
        #[arg(long)]
        skipped: bool,
    },
    /// Print scanned skills as JSON
    Skills {
        /// Print only this skill
        #[arg(long)]
        name: Option<String>,

        /// List excluded directories and why on stderr
        #[arg(long)]
        skipped: bool,
    },
    /// Check configuration and scan roots
    Health,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = resolve_config(cli.config.as_deref());

    if let Some(path) = cli.agents_path {
        config.agents.base_path = path;
    }
    if let Some(path) = cli.system_skills {
        config.skills.system_path = path;
    }
    if let Some(path) = cli.user_skills {
        config.skills.user_path = path;
    }

    match cli.command {
        Commands::Serve {
            port,
            host,
            static_dir,
        } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            if static_dir.is_some() {
                config.server.static_dir = static_dir;
            }

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(clawdocs_gateway::start_gateway(config))?;
        }
        Commands::Agents { id, skipped } => inspect::run_agents(&config, id.as_deref(), skipped)?,
        Commands::Skills { name, skipped } => {
            inspect::run_skills(&config, name.as_deref(), skipped)?
        }
        Commands::Health => {
            println!("clawdocs is healthy");
            println!("  port:          {}", config.server.port);
            print_root("agents", &config.agents.base_path);
            print_root("system skills", &config.skills.system_path);
            print_root("user skills", &config.skills.user_path);
        }
    }

    Ok(())
}

/// Load config, falling back to defaults when the file is unusable.
fn resolve_config(path: Option<&std::path::Path>) -> ClawDocsConfig {
    let loaded = match path {
        Some(p) => clawdocs_config::load_config_from(p),
        None => clawdocs_config::load_config(),
    };
    loaded.unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {e}");
        ClawDocsConfig::from_defaults(|key| std::env::var(key).ok())
    })
}

fn print_root(label: &str, path: &std::path::Path) {
    let state = if path.is_dir() { "ok" } else { "missing" };
    println!("  {:<14} {} ({state})", format!("{label}:"), path.display());
}
