//! HTTP API handlers for annotations-api

pub mod annotations;
pub mod status;

pub use annotations::{get_annotations, get_platform_annotations};
pub use status::status_routes;
