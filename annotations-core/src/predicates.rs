//! Predicate URIs and graph relationship mapping
//!
//! Graph edges carry relationship type names such as `MAJOR_MENTIONS`; API
//! callers see ontology predicate URIs. Relationships without an entry here
//! are not annotations and are dropped by the mapper.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const MENTIONS: &str = "http://www.ft.com/ontology/annotation/mentions";
pub const MAJOR_MENTIONS: &str = "http://www.ft.com/ontology/annotation/majorMentions";
pub const ABOUT: &str = "http://www.ft.com/ontology/annotation/about";
pub const IS_CLASSIFIED_BY: &str = "http://www.ft.com/ontology/classification/isClassifiedBy";
pub const IS_PRIMARILY_CLASSIFIED_BY: &str =
    "http://www.ft.com/ontology/classification/isPrimarilyClassifiedBy";
pub const HAS_AUTHOR: &str = "http://www.ft.com/ontology/annotation/hasAuthor";
pub const IMPLICITLY_CLASSIFIED_BY: &str = "http://www.ft.com/ontology/implicitlyClassifiedBy";
pub const IMPLICITLY_ABOUT: &str = "http://www.ft.com/ontology/implicitlyAbout";

static RELATIONSHIPS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("MENTIONS", MENTIONS),
        ("MAJOR_MENTIONS", MAJOR_MENTIONS),
        ("ABOUT", ABOUT),
        ("IS_CLASSIFIED_BY", IS_CLASSIFIED_BY),
        ("IS_PRIMARILY_CLASSIFIED_BY", IS_PRIMARILY_CLASSIFIED_BY),
        ("HAS_AUTHOR", HAS_AUTHOR),
        ("IMPLICITLY_CLASSIFIED_BY", IMPLICITLY_CLASSIFIED_BY),
        ("IMPLICITLY_ABOUT", IMPLICITLY_ABOUT),
    ])
});

/// Predicate URI for a graph relationship type, if it is an annotation
pub fn predicate_for_relationship(relationship: &str) -> Option<&'static str> {
    RELATIONSHIPS.get(relationship).copied()
}

/// Default importance groups, each ordered from weakest to strongest
pub fn default_importance_groups() -> Vec<Vec<String>> {
    vec![
        vec![MENTIONS.to_string(), MAJOR_MENTIONS.to_string(), ABOUT.to_string()],
        vec![IS_CLASSIFIED_BY.to_string(), IS_PRIMARILY_CLASSIFIED_BY.to_string()],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_relationships() {
        assert_eq!(predicate_for_relationship("MENTIONS"), Some(MENTIONS));
        assert_eq!(predicate_for_relationship("IS_PRIMARILY_CLASSIFIED_BY"), Some(IS_PRIMARILY_CLASSIFIED_BY));
        assert_eq!(predicate_for_relationship("IMPLICITLY_ABOUT"), Some(IMPLICITLY_ABOUT));
    }

    #[test]
    fn test_unknown_relationship() {
        assert_eq!(predicate_for_relationship("EQUIVALENT_TO"), None);
        assert_eq!(predicate_for_relationship("mentions"), None);
    }

    #[test]
    fn test_default_groups_order() {
        let groups = default_importance_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].last().map(String::as_str), Some(ABOUT));
        assert_eq!(groups[1].last().map(String::as_str), Some(IS_PRIMARILY_CLASSIFIED_BY));
    }
}
