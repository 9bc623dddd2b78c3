//! Concept URI and type mapping
//!
//! Turns graph rows (concept UUID, node labels, relationship type) into the
//! public [`Annotation`] representation: concept id URI, API URL and ordered
//! ontology type URIs.
//!
//! # Type hierarchy
//! Labels must form a single chain (e.g. `Thing > Concept > Organisation >
//! Company`). They are sorted least to most specific; the most specific label
//! decides the API path.

use crate::models::{Annotation, Lifecycle};
use crate::predicates::predicate_for_relationship;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

const API_BASE: &str = "http://api.ft.com/";
const TEST_API_BASE: &str = "http://test.api.ft.com/";
const THINGS_PREFIX: &str = "http://api.ft.com/things/";

static PARENT_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Thing", ""),
        ("Concept", "Thing"),
        ("Role", "Thing"),
        ("BoardRole", "Role"),
        ("Classification", "Concept"),
        ("Person", "Concept"),
        ("Organisation", "Concept"),
        ("Membership", "Concept"),
        ("Company", "Organisation"),
        ("PublicCompany", "Company"),
        ("PrivateCompany", "Company"),
        ("Brand", "Classification"),
        ("Subject", "Classification"),
        ("Section", "Classification"),
        ("Genre", "Classification"),
        ("Location", "Concept"),
        ("IndustryClassification", "Classification"),
        ("Topic", "Concept"),
        ("Content", "Thing"),
        ("SpecialReport", "Classification"),
        ("AlphavilleSeries", "Classification"),
        ("FinancialInstrument", "Concept"),
    ])
});

static API_PATHS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Organisation", "organisations"),
        ("Person", "people"),
        ("Brand", "brands"),
        ("Thing", "things"),
        ("Content", "content"),
    ])
});

static TYPE_URIS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Thing", "http://www.ft.com/ontology/core/Thing"),
        ("Concept", "http://www.ft.com/ontology/concept/Concept"),
        ("Role", "http://www.ft.com/ontology/organisation/Role"),
        ("BoardRole", "http://www.ft.com/ontology/organisation/BoardRole"),
        ("Classification", "http://www.ft.com/ontology/classification/Classification"),
        ("IndustryClassification", "http://www.ft.com/ontology/industry/IndustryClassification"),
        ("Person", "http://www.ft.com/ontology/person/Person"),
        ("Organisation", "http://www.ft.com/ontology/organisation/Organisation"),
        ("Membership", "http://www.ft.com/ontology/organisation/Membership"),
        ("Company", "http://www.ft.com/ontology/company/Company"),
        ("PublicCompany", "http://www.ft.com/ontology/company/PublicCompany"),
        ("PrivateCompany", "http://www.ft.com/ontology/company/PrivateCompany"),
        ("Brand", "http://www.ft.com/ontology/product/Brand"),
        ("Subject", "http://www.ft.com/ontology/Subject"),
        ("Section", "http://www.ft.com/ontology/Section"),
        ("Topic", "http://www.ft.com/ontology/Topic"),
        ("Location", "http://www.ft.com/ontology/Location"),
        ("Genre", "http://www.ft.com/ontology/Genre"),
        ("SpecialReport", "http://www.ft.com/ontology/SpecialReport"),
        ("AlphavilleSeries", "http://www.ft.com/ontology/AlphavilleSeries"),
        ("FinancialInstrument", "http://www.ft.com/ontology/FinancialInstrument"),
    ])
});

/// Errors raised while mapping a graph row
#[derive(Debug, Error, PartialEq)]
pub enum MappingError {
    /// Labels are empty, unknown, or do not form a single chain
    #[error("could not map type URIs for concept {0}")]
    UnmappedTypes(String),

    /// Relationship type is not an annotation predicate
    #[error("not a valid annotation type: {0}")]
    UnknownRelationship(String),
}

/// Labels that do not form a single ancestor chain
#[derive(Debug, Error, PartialEq)]
#[error("provided types are not a consistent hierarchy")]
pub struct NotHierarchy;

/// One annotation row as produced by the graph read
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnnotation {
    /// Canonical concept UUID
    pub id: String,
    /// Relationship type name, e.g. `MAJOR_MENTIONS`
    pub predicate: String,
    /// Node labels of the canonical concept
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub pref_label: Option<String>,
    #[serde(default)]
    pub lei_code: Option<String>,
    #[serde(default)]
    pub figi: Option<String>,
    #[serde(default)]
    pub is_deprecated: bool,
    /// Edge lifecycle tag, e.g. `annotations-pac`
    #[serde(default)]
    pub lifecycle: String,
    #[serde(default)]
    pub platform_version: Option<String>,
    #[serde(rename = "tmeIDs", default)]
    pub tme_ids: Vec<String>,
    #[serde(rename = "factsetIDs", default)]
    pub factset_ids: Vec<String>,
    #[serde(default)]
    pub uuids: Vec<String>,
}

fn parent_type(t: &str) -> &str {
    PARENT_TYPES.get(t).copied().unwrap_or("")
}

fn is_descendant(descendant: &str, ancestor: &str) -> bool {
    let mut t = descendant;
    while !t.is_empty() {
        if t == ancestor {
            return true;
        }
        t = parent_type(t);
    }
    false
}

fn depth(t: &str) -> usize {
    let mut d = 0;
    let mut current = parent_type(t);
    while !current.is_empty() {
        d += 1;
        current = parent_type(current);
    }
    d
}

/// Sort labels from least to most specific
pub fn sort_types(labels: &[String]) -> Result<Vec<String>, NotHierarchy> {
    let mut sorted = labels.to_vec();
    sorted.sort_by_key(|t| depth(t));

    for pair in sorted.windows(2) {
        if !is_descendant(&pair[1], &pair[0]) {
            return Err(NotHierarchy);
        }
    }
    Ok(sorted)
}

/// Ontology type URIs for the labels, least specific first
///
/// Returns an empty list when the labels are not a consistent hierarchy.
pub fn type_uris(labels: &[String]) -> Vec<String> {
    match sort_types(labels) {
        Ok(sorted) => sorted
            .iter()
            .filter_map(|label| TYPE_URIS.get(label.as_str()))
            .map(|uri| uri.to_string())
            .collect(),
        Err(e) => {
            tracing::warn!(labels = ?labels, "{}", e);
            Vec::new()
        }
    }
}

/// Public concept identifier URI
pub fn id_url(uuid: &str) -> String {
    format!("{}{}", THINGS_PREFIX, uuid)
}

/// API URL for a concept, chosen from its most specific type
pub fn api_url(uuid: &str, labels: &[String], env: &str) -> String {
    let base = if env == "test" { TEST_API_BASE } else { API_BASE };

    let mut path = None;
    if let Some(most_specific) = sort_types(labels).ok().and_then(|s| s.last().cloned()) {
        let mut t = most_specific.as_str();
        while !t.is_empty() && path.is_none() {
            path = API_PATHS.get(t).copied();
            t = parent_type(t);
        }
    }

    format!("{}{}/{}", base, path.unwrap_or("things"), uuid)
}

/// Map one graph row into the public annotation representation
pub fn map_row(raw: RawAnnotation, env: &str) -> Result<Annotation, MappingError> {
    let types = type_uris(&raw.types);
    if types.is_empty() {
        tracing::debug!(concept_id = %raw.id, labels = ?raw.types, "Could not map type URIs");
        return Err(MappingError::UnmappedTypes(raw.id));
    }

    let predicate = predicate_for_relationship(&raw.predicate).ok_or_else(|| {
        tracing::debug!(concept_id = %raw.id, relationship = %raw.predicate, "Could not find predicate");
        MappingError::UnknownRelationship(raw.predicate.clone())
    })?;

    Ok(Annotation {
        predicate: predicate.to_string(),
        id: id_url(&raw.id),
        api_url: api_url(&raw.id, &raw.types, env),
        types,
        lei_code: raw.lei_code,
        figi: raw.figi,
        pref_label: raw.pref_label,
        is_deprecated: raw.is_deprecated,
        factset_ids: raw.factset_ids,
        tme_ids: raw.tme_ids,
        uuids: raw.uuids,
        platform_version: raw.platform_version,
        lifecycle: Lifecycle::from_tag(&raw.lifecycle),
    })
}
