//! Lifecycle filter
//!
//! Selects which upstream lifecycle is authoritative for a content item:
//! - When any PAC annotation is present, only PAC and V2 annotations survive.
//!   Curated PAC supersedes the legacy V1 pipeline; V2 feeds are independent
//!   and always kept alongside it.
//! - Otherwise the input is left as is.
//!
//! An optional allow-list then narrows the result to the requested
//! lifecycles. An empty result is valid.

use super::AnnotationsFilter;
use crate::models::{Annotation, Lifecycle};
use tracing::debug;

/// Resolves authoritative lifecycles, then applies the caller's allow-list
#[derive(Debug, Default, Clone)]
pub struct LifecycleFilter {
    /// Requested lifecycles; empty means no additional filtering
    lifecycles: Vec<Lifecycle>,
}

impl LifecycleFilter {
    /// Lifecycle filter without an allow-list
    pub fn new() -> Self {
        Self::default()
    }

    /// Lifecycle filter narrowed to the given lifecycles
    ///
    /// Names must already be validated via
    /// [`validate_lifecycle_params`](crate::models::validate_lifecycle_params).
    pub fn with_lifecycles(lifecycles: Vec<Lifecycle>) -> Self {
        Self { lifecycles }
    }

    fn apply_allow_list(&self, annotations: Vec<Annotation>) -> Vec<Annotation> {
        if self.lifecycles.is_empty() {
            return annotations;
        }

        annotations
            .into_iter()
            .filter(|a| self.lifecycles.contains(&a.lifecycle))
            .collect()
    }
}

fn contains_pac(annotations: &[Annotation]) -> bool {
    annotations.iter().any(|a| a.lifecycle == Lifecycle::Pac)
}

impl AnnotationsFilter for LifecycleFilter {
    fn name(&self) -> &'static str {
        "LifecycleFilter"
    }

    fn filter(&self, annotations: Vec<Annotation>) -> Vec<Annotation> {
        let resolved = if contains_pac(&annotations) {
            debug!("PAC annotations present, keeping PAC and V2 lifecycles only");
            annotations
                .into_iter()
                .filter(|a| matches!(a.lifecycle, Lifecycle::Pac | Lifecycle::V2))
                .collect()
        } else {
            annotations
        };

        self.apply_allow_list(resolved)
    }
}
