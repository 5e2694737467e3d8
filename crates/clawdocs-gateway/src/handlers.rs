//! HTTP route handlers.
//!
//! Each request rescans the filesystem on the blocking pool.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::Uri;
use serde_json::{Value, json};

use clawdocs_types::{AgentRecord, SkillRecord};

use crate::GatewayState;
use crate::error::ApiError;

/// Run a blocking scan off the async runtime.
///
/// A panic inside the scan comes back as the `Err` side.
async fn run_scan<T, F>(scan: F) -> Result<T, tokio::task::JoinError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(scan).await
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "clawdocs",
    }))
}

/// GET /api
pub async fn api_root() -> Json<Value> {
    Json(json!({
        "message": "ClawDocs API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/agents: every agent under the configured base path.
pub async fn list_agents(
    State(state): State<Arc<GatewayState>>,
) -> Result<Json<Vec<AgentRecord>>, ApiError> {
    let agents = run_scan(move || {
        clawdocs_scanner::scan_agents(&state.agents_path, &state.agent_criteria)
    })
    .await
    .map_err(|e| ApiError::internal("Failed to fetch agents", e))?;
    Ok(Json(agents))
}

/// GET /api/agents/{id}
pub async fn get_agent(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> Result<Json<AgentRecord>, ApiError> {
    let lookup_id = id.clone();
    let agent = run_scan(move || {
        clawdocs_scanner::get_agent(&lookup_id, &state.agents_path, &state.agent_criteria)
    })
    .await
    .map_err(|e| ApiError::internal("Failed to fetch agent", e))?;

    agent.map(Json).ok_or_else(|| {
        ApiError::not_found("Agent not found", format!("No agent found with ID: {id}"))
    })
}

/// GET /api/skills: system and user skills, user winning on name collisions.
pub async fn list_skills(
    State(state): State<Arc<GatewayState>>,
) -> Result<Json<Vec<SkillRecord>>, ApiError> {
    let skills = run_scan(move || {
        clawdocs_scanner::scan_skills(&state.system_skills_path, &state.user_skills_path)
    })
    .await
    .map_err(|e| ApiError::internal("Failed to fetch skills", e))?;
    Ok(Json(skills))
}

/// GET /api/skills/{name}
pub async fn get_skill(
    State(state): State<Arc<GatewayState>>,
    Path(name): Path<String>,
) -> Result<Json<SkillRecord>, ApiError> {
    let lookup_name = name.clone();
    let skill = run_scan(move || {
        clawdocs_scanner::get_skill(
            &lookup_name,
            &state.system_skills_path,
            &state.user_skills_path,
        )
    })
    .await
    .map_err(|e| ApiError::internal("Failed to fetch skill", e))?;

    skill.map(Json).ok_or_else(|| {
        ApiError::not_found("Skill not found", format!("No skill found with name: {name}"))
    })
}

/// Unknown routes (and every non-API path when no UI is served).
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found("Not found", format!("No route for {}", uri.path()))
}
