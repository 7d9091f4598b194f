use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form string annotations attached to a stored vector.
pub type Metadata = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub(crate) struct StoredEntry {
    pub key: String,
    pub vector: Vec<f32>,
    pub metadata: Option<Metadata>,
}

/// Result of a key lookup. Both fields are reported independently:
/// a present key may still have no metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Retrieved<'a> {
    pub vector: Option<&'a [f32]>,
    pub metadata: Option<&'a Metadata>,
}

impl Retrieved<'_> {
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        self.vector.is_none() && self.metadata.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredKey {
    pub key: String,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub key: String,
    pub score: f32,
    pub metadata: Metadata,
}
