//! Annotation filter chain
//!
//! Filters are pure, composable transforms over an ordered list of
//! annotations. A [`FilterChain`] runs them in order and always finishes with
//! the [`DedupFilter`], so every chain's output is free of duplicate
//! `(predicate, id)` pairs.
//!
//! # Canonical order
//! Lifecycle → Predicate importance → Dedup

pub mod chain;
pub mod dedup;
pub mod lifecycle;
pub mod predicate;

pub use chain::FilterChain;
pub use dedup::DedupFilter;
pub use lifecycle::LifecycleFilter;
pub use predicate::PredicateFilter;

use crate::models::Annotation;

/// One stage of the filter chain
///
/// Implementations must be total: no input makes a filter fail. Filters only
/// select which records survive and never rewrite a record's fields.
/// Configuration is immutable so a filter can be shared across requests.
pub trait AnnotationsFilter: Send + Sync {
    /// Filter name used in logs
    fn name(&self) -> &'static str;

    /// Produce this stage's ordered output from the previous stage's output
    fn filter(&self, annotations: Vec<Annotation>) -> Vec<Annotation>;
}
