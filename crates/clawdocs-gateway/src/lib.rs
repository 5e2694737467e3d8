//! clawdocs-gateway: read-only HTTP API over the agent and skill scanners.
//!
//! Routes:
//! - `GET /health`
//! - `GET /api`
//! - `GET /api/agents`, `GET /api/agents/{id}`
//! - `GET /api/skills`, `GET /api/skills/{name}`
//!
//! Optionally serves a built dashboard UI with an `index.html` fallback for
//! client-side routing.

pub mod error;
pub mod handlers;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use clawdocs_config::ClawDocsConfig;
use clawdocs_types::AgentCriteria;

pub use error::{ApiError, GatewayError};

/// Shared gateway state: where to scan. Nothing scanned is kept here.
#[derive(Debug, Clone)]
pub struct GatewayState {
    pub agents_path: PathBuf,
    pub agent_criteria: AgentCriteria,
    pub system_skills_path: PathBuf,
    pub user_skills_path: PathBuf,
}

impl GatewayState {
    pub fn new(
        agents_path: PathBuf,
        agent_criteria: AgentCriteria,
        system_skills_path: PathBuf,
        user_skills_path: PathBuf,
    ) -> Self {
        Self {
            agents_path,
            agent_criteria,
            system_skills_path,
            user_skills_path,
        }
    }

    pub fn from_config(config: &ClawDocsConfig) -> Self {
        Self::new(
            config.agents.base_path.clone(),
            config.agents.criteria.clone(),
            config.skills.system_path.clone(),
            config.skills.user_path.clone(),
        )
    }
}

/// Build the router (shared between production startup and tests).
pub fn build_router(state: Arc<GatewayState>, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/health", get(handlers::health))
        .route("/api", get(handlers::api_root))
        .route("/api/agents", get(handlers::list_agents))
        .route("/api/agents/{id}", get(handlers::get_agent))
        .route("/api/skills", get(handlers::list_skills))
        .route("/api/skills/{name}", get(handlers::get_skill))
        .route("/api/{*rest}", get(handlers::not_found))
        .with_state(state);

    let router = match static_dir {
        Some(dir) => {
            let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
            router.fallback_service(spa)
        }
        None => router.fallback(handlers::not_found),
    };

    router.layer(TraceLayer::new_for_http()).layer(cors)
}

/// Start the HTTP server and serve until the process exits.
pub async fn start_gateway(config: ClawDocsConfig) -> Result<(), GatewayError> {
    let host = config.server.host.clone();
    let port = config.server.port;
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    let state = Arc::new(GatewayState::from_config(&config));
    info!("Agents:        {}", state.agents_path.display());
    info!("System skills: {}", state.system_skills_path.display());
    info!("User skills:   {}", state.user_skills_path.display());

    let static_dir = config.server.static_dir.as_deref();
    if let Some(dir) = static_dir {
        if dir.join("index.html").is_file() {
            info!("Dashboard UI:  {}", dir.display());
        } else {
            tracing::warn!("No index.html in static dir {}", dir.display());
        }
    }

    let app = build_router(state, static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("ClawDocs listening on http://{addr}");
    info!("  API:    http://{addr}/api");
    info!("  Health: http://{addr}/health");

    axum::serve(listener, app).await?;

    Ok(())
}
