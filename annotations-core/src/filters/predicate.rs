//! Predicate importance filter
//!
//! Collapses competing predicates that describe the same kind of relation to
//! a concept at different strengths. Predicates are arranged in importance
//! groups, ordered weakest to strongest:
//!
//! ```text
//! [mentions, majorMentions, about]
//! [isClassifiedBy, isPrimarilyClassifiedBy]
//! ```
//!
//! For each (group, concept) only the strongest annotation survives.
//! Predicates outside every group pass through untouched.

use super::AnnotationsFilter;
use crate::models::Annotation;
use crate::predicates::default_importance_groups;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

/// Keeps the most important predicate per concept within each group
#[derive(Debug, Clone)]
pub struct PredicateFilter {
    /// Importance groups, weakest to strongest
    groups: Vec<Vec<String>>,
    /// Lowercased predicate → (group index, position in group)
    ranks: HashMap<String, (usize, usize)>,
}

impl PredicateFilter {
    /// Predicate filter with the default importance groups
    pub fn new() -> Self {
        Self::with_groups(default_importance_groups())
    }

    /// Predicate filter with custom importance groups
    ///
    /// A predicate listed more than once keeps its first (group, position).
    pub fn with_groups(groups: Vec<Vec<String>>) -> Self {
        let mut ranks = HashMap::new();
        for (group, predicates) in groups.iter().enumerate() {
            for (pos, predicate) in predicates.iter().enumerate() {
                ranks
                    .entry(predicate.to_ascii_lowercase())
                    .or_insert((group, pos));
            }
        }
        Self { groups, ranks }
    }

    /// Configured importance groups
    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }

    /// Group index and importance of a predicate, matched case-insensitively
    fn rank(&self, predicate: &str) -> Option<(usize, usize)> {
        self.ranks.get(&predicate.to_ascii_lowercase()).copied()
    }
}

impl Default for PredicateFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationsFilter for PredicateFilter {
    fn name(&self) -> &'static str {
        "PredicateFilter"
    }

    fn filter(&self, annotations: Vec<Annotation>) -> Vec<Annotation> {
        let mut out: Vec<Annotation> = Vec::with_capacity(annotations.len());
        // (group, concept) → (index in out, importance of current best)
        let mut best: HashMap<(usize, String), (usize, usize)> = HashMap::new();

        for annotation in annotations {
            let Some((group, pos)) = self.rank(&annotation.predicate) else {
                out.push(annotation);
                continue;
            };

            match best.entry((group, annotation.id.clone())) {
                Entry::Vacant(slot) => {
                    slot.insert((out.len(), pos));
                    out.push(annotation);
                }
                Entry::Occupied(mut slot) => {
                    let (idx, current) = *slot.get();
                    // Ties keep the first occurrence
                    if pos > current {
                        debug!(
                            concept_id = %annotation.id,
                            replaced = %out[idx].predicate,
                            winner = %annotation.predicate,
                            "More important predicate found"
                        );
                        out[idx] = annotation;
                        slot.get_mut().1 = pos;
                    }
                }
            }
        }

        out
    }
}
