//! annotations-api library - public annotations read service
//!
//! Reads a content item's raw annotations from an [`AnnotationSource`],
//! runs them through the annotations filter chain and serves the result.

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod source;

pub use source::{AnnotationSource, FixtureSource, SourceError};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Where raw annotations come from
    pub source: Arc<dyn AnnotationSource>,
    /// `Cache-Control` header value for successful annotation responses
    pub cache_control: String,
}

impl AppState {
    /// Create new application state
    pub fn new(source: Arc<dyn AnnotationSource>, cache_control: impl Into<String>) -> Self {
        Self {
            source,
            cache_control: cache_control.into(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/content/:uuid/annotations", get(api::get_annotations))
        .route(
            "/content/:uuid/annotations/:platform_version",
            get(api::get_platform_annotations),
        )
        .merge(api::status_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
