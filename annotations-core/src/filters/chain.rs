//! Filter chain executor
//!
//! Composes filters into an ordered chain and folds input through them. The
//! [`DedupFilter`] is appended on construction, whatever the caller passes,
//! so no chain can skip it.
//!
//! # Example
//! ```
//! use annotations_core::filters::{FilterChain, LifecycleFilter, PredicateFilter};
//! use annotations_core::models::Annotation;
//! use annotations_core::predicates::{ABOUT, MENTIONS};
//!
//! let chain = FilterChain::new(vec![
//!     Box::new(LifecycleFilter::new()),
//!     Box::new(PredicateFilter::new()),
//! ]);
//! let out = chain.run(vec![Annotation::new(MENTIONS, "A"), Annotation::new(ABOUT, "A")]);
//! assert_eq!(out, vec![Annotation::new(ABOUT, "A")]);
//! ```

use super::{AnnotationsFilter, DedupFilter, LifecycleFilter, PredicateFilter};
use crate::models::{Annotation, Lifecycle};
use tracing::debug;

/// Ordered list of filters, always ending with [`DedupFilter`]
pub struct FilterChain {
    filters: Vec<Box<dyn AnnotationsFilter>>,
}

impl FilterChain {
    /// Build a chain from the given filters plus the terminal dedup filter
    pub fn new(mut filters: Vec<Box<dyn AnnotationsFilter>>) -> Self {
        filters.push(Box::new(DedupFilter::new()));
        Self { filters }
    }

    /// Canonical chain: lifecycle → predicate importance → dedup
    pub fn default_chain(lifecycles: Vec<Lifecycle>) -> Self {
        Self::new(vec![
            Box::new(LifecycleFilter::with_lifecycles(lifecycles)),
            Box::new(PredicateFilter::new()),
        ])
    }

    /// Names of the filters in execution order
    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Run the input through every filter in order
    pub fn run(&self, annotations: Vec<Annotation>) -> Vec<Annotation> {
        self.filters.iter().fold(annotations, |current, filter| {
            let input_count = current.len();
            let output = filter.filter(current);
            debug!(
                filter = filter.name(),
                input_count,
                output_count = output.len(),
                "Applied annotations filter"
            );
            output
        })
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::default_chain(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicates::{ABOUT, IS_CLASSIFIED_BY, MENTIONS};

    struct DropAll;

    impl AnnotationsFilter for DropAll {
        fn name(&self) -> &'static str {
            "DropAll"
        }

        fn filter(&self, _annotations: Vec<Annotation>) -> Vec<Annotation> {
            Vec::new()
        }
    }

    #[test]
    fn test_empty_chain_still_dedups() {
        let chain = FilterChain::new(vec![]);
        assert_eq!(chain.filter_names(), vec!["DedupFilter"]);

        let out = chain.run(vec![Annotation::new(ABOUT, "A"), Annotation::new(ABOUT, "A")]);
        assert_eq!(out, vec![Annotation::new(ABOUT, "A")]);
    }

    #[test]
    fn test_default_chain_order() {
        assert_eq!(
            FilterChain::default().filter_names(),
            vec!["LifecycleFilter", "PredicateFilter", "DedupFilter"]
        );
    }

    #[test]
    fn test_dedup_is_appended_after_caller_filters() {
        let chain = FilterChain::new(vec![Box::new(DedupFilter::new()), Box::new(DropAll)]);
        assert_eq!(chain.filter_names(), vec!["DedupFilter", "DropAll", "DedupFilter"]);
        assert!(chain.run(vec![Annotation::new(ABOUT, "A")]).is_empty());
    }

    #[test]
    fn test_lifecycle_runs_before_predicate_reduction() {
        // The PAC about must not be replaced by anything from v1
        let input = vec![
            Annotation::new(MENTIONS, "A").with_lifecycle(Lifecycle::Pac),
            Annotation::new(ABOUT, "A").with_lifecycle(Lifecycle::V1),
            Annotation::new(IS_CLASSIFIED_BY, "C").with_lifecycle(Lifecycle::V1),
        ];
        let out = FilterChain::default().run(input);
        assert_eq!(out, vec![Annotation::new(MENTIONS, "A").with_lifecycle(Lifecycle::Pac)]);
    }

    #[test]
    fn test_allow_list_applies_before_reduction() {
        let input = vec![
            Annotation::new(MENTIONS, "A").with_lifecycle(Lifecycle::V1),
            Annotation::new(ABOUT, "A").with_lifecycle(Lifecycle::V2),
        ];
        let out = FilterChain::default_chain(vec![Lifecycle::V1]).run(input);
        assert_eq!(out, vec![Annotation::new(MENTIONS, "A").with_lifecycle(Lifecycle::V1)]);
    }

    #[test]
    fn test_chain_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FilterChain>();
    }
}
