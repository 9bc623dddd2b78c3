//! Annotation model and lifecycle tags
//!
//! An [`Annotation`] is one assertion that a content item relates to a concept
//! via a predicate. The `(predicate, id)` pair is the dedup identity used by
//! the filter chain.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire tag stored on graph edges for the curated editorial lifecycle
pub const PAC_TAG: &str = "annotations-pac";
/// Wire tag for the legacy automated lifecycle
pub const V1_TAG: &str = "annotations-v1";
/// Wire tag for independent machine/third-party feeds
pub const V2_TAG: &str = "annotations-v2";
/// Wire tag for video annotations
pub const NEXT_VIDEO_TAG: &str = "annotations-next-video";

/// Upstream pipeline that asserted an annotation edge
///
/// The four named variants form the closed set known to the lifecycle filter.
/// Anything else read from the graph (including an empty tag) is kept as
/// `Other` so that it can still pass through when no allow-list is given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Pac,
    V1,
    V2,
    NextVideo,
    Other(String),
}

impl Lifecycle {
    /// Human-facing names accepted in the `lifecycle` query parameter
    pub const NAMES: [&'static str; 4] = ["next-video", "v1", "pac", "v2"];

    /// Map a wire tag (e.g. `annotations-pac`) to a lifecycle
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            PAC_TAG => Lifecycle::Pac,
            V1_TAG => Lifecycle::V1,
            V2_TAG => Lifecycle::V2,
            NEXT_VIDEO_TAG => Lifecycle::NextVideo,
            other => Lifecycle::Other(other.to_string()),
        }
    }

    /// Map a human-facing name (e.g. `pac`) to a lifecycle
    ///
    /// # Errors
    /// Returns `Error::InvalidLifecycle` for names outside the fixed table.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "pac" => Ok(Lifecycle::Pac),
            "v1" => Ok(Lifecycle::V1),
            "v2" => Ok(Lifecycle::V2),
            "next-video" => Ok(Lifecycle::NextVideo),
            other => Err(Error::InvalidLifecycle(other.to_string())),
        }
    }

    /// Wire tag for this lifecycle
    pub fn tag(&self) -> &str {
        match self {
            Lifecycle::Pac => PAC_TAG,
            Lifecycle::V1 => V1_TAG,
            Lifecycle::V2 => V2_TAG,
            Lifecycle::NextVideo => NEXT_VIDEO_TAG,
            Lifecycle::Other(tag) => tag,
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Lifecycle::Other(String::new())
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Validate every caller-supplied lifecycle name before any filtering runs
///
/// Fails on the first name not in [`Lifecycle::NAMES`].
pub fn validate_lifecycle_params<S: AsRef<str>>(names: &[S]) -> Result<Vec<Lifecycle>> {
    names
        .iter()
        .map(|name| Lifecycle::from_name(name.as_ref()))
        .collect()
}

/// One annotation as returned to API callers
///
/// `lifecycle` is used for filtering only and is never serialized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub predicate: String,
    pub id: String,
    pub api_url: String,
    pub types: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lei_code: Option<String>,

    #[serde(rename = "FIGI", default, skip_serializing_if = "Option::is_none")]
    pub figi: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pref_label: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_deprecated: bool,

    // Identifiers of the concept in upstream systems
    #[serde(rename = "factsetIDs", default, skip_serializing_if = "Vec::is_empty")]
    pub factset_ids: Vec<String>,

    #[serde(rename = "tmeIDs", default, skip_serializing_if = "Vec::is_empty")]
    pub tme_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uuids: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_version: Option<String>,

    #[serde(skip)]
    pub lifecycle: Lifecycle,
}

impl Annotation {
    /// Create a bare annotation for the given predicate and concept
    pub fn new(predicate: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the lifecycle tag
    pub fn with_lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Dedup identity of this annotation
    pub fn key(&self) -> (&str, &str) {
        (&self.predicate, &self.id)
    }
}
