//! Service status endpoints
//!
//! - `/__health`: detailed check of the annotation source
//! - `/__gtg`: good-to-go for load balancers
//! - `/__build-info`: build identification
//! - `/__ping`: liveness

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

const SYSTEM_CODE: &str = "annotationsapi";
const SERVICE_NAME: &str = "public-annotations-api";
const DESCRIPTION: &str = "A public RESTful API for accessing Annotations";

/// One entry of the health report
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    pub id: String,
    pub name: String,
    pub ok: bool,
    pub severity: u8,
    pub business_impact: String,
    pub technical_summary: String,
    pub check_output: String,
}

/// Health report
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub schema_version: u8,
    pub system_code: String,
    pub name: String,
    pub description: String,
    pub checks: Vec<HealthCheck>,
    pub ok: bool,
}

/// Build identification captured by build.rs
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    pub version: String,
    pub git_hash: String,
    pub build_timestamp: String,
    pub build_profile: String,
}

async fn source_check(state: &AppState) -> Result<String, String> {
    match state.source.check_connectivity().await {
        Ok(()) => Ok("Connectivity to annotation source is ok".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// GET /__health
///
/// Always 200; the body reports whether each check passed.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let result = source_check(&state).await;
    let ok = result.is_ok();

    let check = HealthCheck {
        id: "annotation-source-health".to_string(),
        name: "Check connectivity to the annotation source".to_string(),
        ok,
        severity: 1,
        business_impact: "Unable to respond to Public Annotations api requests".to_string(),
        technical_summary: "Cannot read from the annotation source. Check that the backing store is up and reachable.".to_string(),
        check_output: result.unwrap_or_else(|e| e),
    };

    Json(HealthResponse {
        schema_version: 1,
        system_code: SYSTEM_CODE.to_string(),
        name: SERVICE_NAME.to_string(),
        description: DESCRIPTION.to_string(),
        checks: vec![check],
        ok,
    })
}

/// GET /__gtg
pub async fn good_to_go(State(state): State<AppState>) -> (StatusCode, String) {
    match source_check(&state).await {
        Ok(_) => (StatusCode::OK, "OK".to_string()),
        Err(message) => (StatusCode::SERVICE_UNAVAILABLE, message),
    }
}

/// GET /__build-info
pub async fn build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: env!("GIT_HASH").to_string(),
        build_timestamp: env!("BUILD_TIMESTAMP").to_string(),
        build_profile: env!("BUILD_PROFILE").to_string(),
    })
}

/// GET /__ping
pub async fn ping() -> &'static str {
    "pong"
}

/// Build status routes
pub fn status_routes() -> Router<AppState> {
    Router::new()
        .route("/__health", get(health))
        .route("/__gtg", get(good_to_go))
        .route("/__build-info", get(build_info))
        .route("/__ping", get(ping))
}
