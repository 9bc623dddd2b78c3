//! # Annotations Core Library
//!
//! Shared code for the public annotations service including:
//! - Annotation model and lifecycle tags
//! - Predicate and relationship tables
//! - Concept URI and type mapping
//! - The annotation filter chain (lifecycle, predicate importance, dedup)
//! - Configuration loading

pub mod config;
pub mod error;
pub mod filters;
pub mod mapper;
pub mod models;
pub mod predicates;

pub use error::{Error, Result};
pub use filters::{AnnotationsFilter, FilterChain};
pub use models::{Annotation, Lifecycle};
