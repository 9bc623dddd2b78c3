//! Content annotations endpoints
//!
//! `GET /content/:uuid/annotations[?lifecycle=pac&lifecycle=v2]`
//! `GET /content/:uuid/annotations/:platform_version[?lifecycle=..]`
//!
//! Lifecycle names are validated before the source is queried; the source's
//! annotations then run through the canonical filter chain.

use annotations_core::filters::FilterChain;
use annotations_core::models::{validate_lifecycle_params, Annotation, Lifecycle};
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::source::SourceError;
use crate::AppState;

/// GET /content/:uuid/annotations
///
/// Responses:
/// - 200 with the filtered annotation list (possibly empty)
/// - 400 for a malformed uuid or an unknown lifecycle name
/// - 404 when the source has no annotations for the content
/// - 503 when the source fails
pub async fn get_annotations(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Response> {
    let lifecycles = parse_request(&uuid, &params)?;
    let read = state.source.read(&uuid).await;
    filtered_response(&state, &uuid, "", lifecycles, read)
}

/// GET /content/:uuid/annotations/:platform_version
///
/// Same as [`get_annotations`], restricted to annotations written by one
/// platform version. Error messages name the platform version.
pub async fn get_platform_annotations(
    State(state): State<AppState>,
    Path((uuid, platform_version)): Path<(String, String)>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Response> {
    let lifecycles = parse_request(&uuid, &params)?;
    let read = state.source.filtered_read(&uuid, &platform_version).await;
    let scope = format!(" for platformVersion {}", platform_version);
    filtered_response(&state, &uuid, &scope, lifecycles, read)
}

fn parse_request(uuid: &str, params: &[(String, String)]) -> ApiResult<Vec<Lifecycle>> {
    if Uuid::parse_str(uuid).is_err() {
        return Err(ApiError::BadRequest(format!("malformed uuid: {}", uuid)));
    }

    let lifecycle_params: Vec<&str> = params
        .iter()
        .filter(|(key, _)| key == "lifecycle")
        .map(|(_, value)| value.as_str())
        .collect();

    validate_lifecycle_params(lifecycle_params.as_slice()).map_err(|e| {
        warn!(error = %e, "invalid query parameter");
        ApiError::BadRequest("invalid query parameter".to_string())
    })
}

fn filtered_response(
    state: &AppState,
    uuid: &str,
    scope: &str,
    lifecycles: Vec<Lifecycle>,
    read: Result<Option<Vec<Annotation>>, SourceError>,
) -> ApiResult<Response> {
    let annotations = match read {
        Ok(Some(annotations)) => annotations,
        Ok(None) => {
            return Err(ApiError::NotFound(format!(
                "No annotations found for content with uuid {}{}.",
                uuid, scope
            )));
        }
        Err(e) => {
            error!(content_uuid = %uuid, scope, error = %e, "failed getting annotations for content");
            return Err(ApiError::Unavailable(format!(
                "Error getting annotations for content with uuid {}{}",
                uuid, scope
            )));
        }
    };

    let raw_count = annotations.len();
    let filtered = FilterChain::default_chain(lifecycles).run(annotations);
    debug!(
        content_uuid = %uuid,
        raw_count,
        filtered_count = filtered.len(),
        "Annotations filtered"
    );

    Ok((
        [(header::CACHE_CONTROL, state.cache_control.clone())],
        Json(filtered),
    )
        .into_response())
}
