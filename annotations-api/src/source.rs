//! Annotation sources
//!
//! An [`AnnotationSource`] resolves graph structure into flat annotations for
//! one content item. It is injected into [`AppState`](crate::AppState); there
//! is no process-wide driver.
//!
//! [`FixtureSource`] serves graph rows from a JSON file of the form
//! `{ "<content uuid>": [ { "id": .., "predicate": "ABOUT", .. } ] }`.
//! Rows may carry a `platformVersion`, which [`AnnotationSource::filtered_read`]
//! matches exactly.

use annotations_core::mapper::{map_row, RawAnnotation};
use annotations_core::models::Annotation;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised by an annotation source
#[derive(Debug, Error)]
pub enum SourceError {
    /// Backing store cannot be reached
    #[error("annotation source unavailable: {0}")]
    Unavailable(String),

    /// Source data could not be loaded
    #[error("failed to load annotations: {0}")]
    Load(#[from] annotations_core::Error),
}

/// Provider of raw annotations for content items
#[async_trait]
pub trait AnnotationSource: Send + Sync {
    /// Annotations for a content item, or `None` when nothing is found
    async fn read(&self, content_uuid: &str) -> Result<Option<Vec<Annotation>>, SourceError>;

    /// Annotations for a content item written by one platform version, or
    /// `None` when that version asserted nothing for it
    async fn filtered_read(
        &self,
        content_uuid: &str,
        platform_version: &str,
    ) -> Result<Option<Vec<Annotation>>, SourceError>;

    /// Verify the backing store is reachable
    async fn check_connectivity(&self) -> Result<(), SourceError>;
}

/// In-memory source built from graph rows
#[derive(Debug, Default)]
pub struct FixtureSource {
    annotations: HashMap<String, Vec<Annotation>>,
}

impl FixtureSource {
    /// Source with no content at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Map graph rows keyed by content UUID
    ///
    /// Rows that cannot be mapped are dropped. Content left with no
    /// annotations is treated as not found.
    pub fn from_rows(rows: HashMap<String, Vec<RawAnnotation>>, env: &str) -> Self {
        let annotations = rows
            .into_iter()
            .filter_map(|(content_uuid, raw)| {
                let row_count = raw.len();
                let mapped: Vec<Annotation> = raw
                    .into_iter()
                    .filter_map(|row| map_row(row, env).ok())
                    .collect();

                if mapped.len() < row_count {
                    debug!(
                        content_uuid = %content_uuid,
                        dropped = row_count - mapped.len(),
                        "Dropped unmappable annotation rows"
                    );
                }

                (!mapped.is_empty()).then_some((content_uuid, mapped))
            })
            .collect();

        Self { annotations }
    }

    /// Load graph rows from a JSON file
    pub fn from_file(path: &Path, env: &str) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path).map_err(annotations_core::Error::from)?;
        let rows: HashMap<String, Vec<RawAnnotation>> =
            serde_json::from_str(&content).map_err(annotations_core::Error::from)?;

        let source = Self::from_rows(rows, env);
        info!(
            path = %path.display(),
            content_count = source.annotations.len(),
            "Loaded annotation fixtures"
        );
        Ok(source)
    }
}

#[async_trait]
impl AnnotationSource for FixtureSource {
    async fn read(&self, content_uuid: &str) -> Result<Option<Vec<Annotation>>, SourceError> {
        let found = self.annotations.get(content_uuid).cloned();
        debug!(
            content_uuid,
            count = found.as_ref().map(Vec::len).unwrap_or(0),
            "Read annotations"
        );
        Ok(found)
    }

    async fn filtered_read(
        &self,
        content_uuid: &str,
        platform_version: &str,
    ) -> Result<Option<Vec<Annotation>>, SourceError> {
        let found: Vec<Annotation> = self
            .annotations
            .get(content_uuid)
            .into_iter()
            .flatten()
            .filter(|ann| ann.platform_version.as_deref() == Some(platform_version))
            .cloned()
            .collect();

        debug!(
            content_uuid,
            platform_version,
            count = found.len(),
            "Read annotations for platform version"
        );
        Ok((!found.is_empty()).then_some(found))
    }

    async fn check_connectivity(&self) -> Result<(), SourceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annotations_core::models::Lifecycle;
    use annotations_core::predicates::ABOUT;

    fn row(id: &str, predicate: &str, types: &[&str]) -> RawAnnotation {
        RawAnnotation {
            id: id.to_string(),
            predicate: predicate.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
            lifecycle: "annotations-pac".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_read_mapped_rows() {
        let rows = HashMap::from([(
            "content-1".to_string(),
            vec![row("c1", "ABOUT", &["Thing", "Concept", "Topic"])],
        )]);
        let source = FixtureSource::from_rows(rows, "prod");

        let anns = source.read("content-1").await.unwrap().unwrap();
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].predicate, ABOUT);
        assert_eq!(anns[0].id, "http://api.ft.com/things/c1");
        assert_eq!(anns[0].lifecycle, Lifecycle::Pac);
    }

    #[tokio::test]
    async fn test_filtered_read_matches_platform_version() {
        let mut v1 = row("c1", "MENTIONS", &["Thing", "Concept", "Person"]);
        v1.platform_version = Some("v1".to_string());
        let mut v2 = row("c2", "ABOUT", &["Thing", "Concept", "Topic"]);
        v2.platform_version = Some("v2".to_string());
        let untagged = row("c3", "ABOUT", &["Thing", "Concept", "Topic"]);

        let rows = HashMap::from([("content-1".to_string(), vec![v1, v2, untagged])]);
        let source = FixtureSource::from_rows(rows, "prod");

        let anns = source.filtered_read("content-1", "v2").await.unwrap().unwrap();
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].id, "http://api.ft.com/things/c2");
        assert_eq!(anns[0].platform_version.as_deref(), Some("v2"));

        assert!(source.filtered_read("content-1", "V2").await.unwrap().is_none());
        assert!(source.filtered_read("content-1", "pac").await.unwrap().is_none());
        assert!(source.filtered_read("missing", "v1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unmappable_content_is_not_found() {
        let rows = HashMap::from([(
            "content-1".to_string(),
            vec![
                row("c1", "EQUIVALENT_TO", &["Thing", "Concept"]),
                row("c2", "ABOUT", &[]),
            ],
        )]);
        let source = FixtureSource::from_rows(rows, "prod");
        assert!(source.read("content-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_content_is_not_found() {
        let source = FixtureSource::empty();
        assert!(source.read("missing").await.unwrap().is_none());
        assert!(source.check_connectivity().await.is_ok());
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            FixtureSource::from_file(&missing, "prod"),
            Err(SourceError::Load(_))
        ));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "[1, 2, 3]").unwrap();
        assert!(matches!(FixtureSource::from_file(&bad, "prod"), Err(SourceError::Load(_))));
    }
}
