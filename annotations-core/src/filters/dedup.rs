//! Duplicate eliminator
//!
//! Terminal stage of every [`FilterChain`](super::FilterChain). Keeps the
//! first annotation for each `(predicate, id)` pair and drops later repeats.

use super::AnnotationsFilter;
use crate::models::Annotation;
use std::collections::HashSet;

/// Removes literal `(predicate, id)` duplicates, preserving first-seen order
#[derive(Debug, Default, Clone, Copy)]
pub struct DedupFilter;

impl DedupFilter {
    pub fn new() -> Self {
        Self
    }
}

impl AnnotationsFilter for DedupFilter {
    fn name(&self) -> &'static str {
        "DedupFilter"
    }

    fn filter(&self, annotations: Vec<Annotation>) -> Vec<Annotation> {
        let mut seen: HashSet<(String, String)> = HashSet::with_capacity(annotations.len());
        annotations
            .into_iter()
            .filter(|a| seen.insert((a.predicate.clone(), a.id.clone())))
            .collect()
    }
}
