use crate::error::{Result, VectorStoreError};
use crate::metric::SimilarityMetric;
use crate::types::{Metadata, Retrieved, ScoredKey, SearchHit, StoredEntry};
use std::cmp::Ordering;
use std::collections::HashMap;

/// In-memory keyed collection of vectors with optional metadata.
///
/// Entries are kept in first-insertion order; `index` maps each key to its
/// slot. Nothing is ever removed, so slots are stable for the life of the
/// store and double as the tie-break order for equal scores.
///
/// The store does no locking of its own. Mutation needs `&mut self`; callers
/// that share a store across tasks wrap it in their own lock.
#[derive(Debug, Clone, Default)]
pub struct VectorStore {
    entries: Vec<StoredEntry>,
    index: HashMap<String, usize>,
}

impl VectorStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Insert or overwrite `key`.
    ///
    /// The vector is always replaced. Metadata is replaced only when
    /// `metadata` is `Some`; otherwise whatever the key already had is kept.
    /// Vector length is not checked here, mismatches surface at search time.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        vector: Vec<f32>,
        metadata: Option<Metadata>,
    ) {
        let key = key.into();
        if let Some(&slot) = self.index.get(&key) {
            let entry = &mut self.entries[slot];
            entry.vector = vector;
            if metadata.is_some() {
                entry.metadata = metadata;
            }
            return;
        }

        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(StoredEntry {
            key,
            vector,
            metadata,
        });
    }

    /// Look up a key. A missing key is not an error: both fields come back
    /// absent.
    #[must_use]
    pub fn retrieve(&self, key: &str) -> Retrieved<'_> {
        match self.index.get(key) {
            Some(&slot) => {
                let entry = &self.entries[slot];
                Retrieved {
                    vector: Some(entry.vector.as_slice()),
                    metadata: entry.metadata.as_ref(),
                }
            }
            None => Retrieved {
                vector: None,
                metadata: None,
            },
        }
    }

    /// Exact top-`k` search by linear scan.
    ///
    /// Returns `min(k, len)` hits sorted by descending score. Equal scores
    /// keep first-insertion order and NaN scores sort after every number.
    /// Fails if any stored vector's length differs from the query's.
    pub fn search(
        &self,
        query: &[f32],
        k: usize,
        metric: &SimilarityMetric,
    ) -> Result<Vec<ScoredKey>> {
        let ranked = self.rank(query, k, metric)?;
        Ok(ranked
            .into_iter()
            .map(|(slot, score)| ScoredKey {
                key: self.entries[slot].key.clone(),
                score,
            })
            .collect())
    }

    /// Same ranking as [`VectorStore::search`], with each hit carrying its
    /// stored metadata (empty when none was ever attached).
    pub fn search_with_metadata(
        &self,
        query: &[f32],
        k: usize,
        metric: &SimilarityMetric,
    ) -> Result<Vec<SearchHit>> {
        let ranked = self.rank(query, k, metric)?;
        Ok(ranked
            .into_iter()
            .map(|(slot, score)| {
                let entry = &self.entries[slot];
                SearchHit {
                    key: entry.key.clone(),
                    score,
                    metadata: entry.metadata.clone().unwrap_or_default(),
                }
            })
            .collect())
    }

    fn rank(
        &self,
        query: &[f32],
        k: usize,
        metric: &SimilarityMetric,
    ) -> Result<Vec<(usize, f32)>> {
        log::debug!(
            "Searching {} entries (k: {}, metric: {})",
            self.entries.len(),
            k,
            metric.name()
        );

        if k == 0 || self.entries.is_empty() {
            return Ok(Vec::new());
        }

        let mut scores = Vec::with_capacity(self.entries.len());
        for (slot, entry) in self.entries.iter().enumerate() {
            if entry.vector.len() != query.len() {
                return Err(VectorStoreError::DimensionMismatch {
                    key: entry.key.clone(),
                    expected: query.len(),
                    actual: entry.vector.len(),
                });
            }
            scores.push((slot, metric.score(query, &entry.vector)));
        }

        scores.sort_by(|a, b| compare_scores(a.1, b.1).then_with(|| a.0.cmp(&b.0)));
        scores.truncate(k);

        log::debug!("Found {} results", scores.len());
        Ok(scores)
    }

    /// Keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    /// Length of the first inserted vector, if any.
    #[must_use]
    pub fn dimension(&self) -> Option<usize> {
        self.entries.first().map(|entry| entry.vector.len())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Descending by score, NaN last.
fn compare_scores(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}
