use crate::embeddings::EmbeddingProvider;
use crate::error::{Result, VectorStoreError};
use crate::store::VectorStore;
use crate::types::Metadata;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Metadata key the label of each text is stored under.
pub const DEFAULT_LABEL_KEY: &str = "main_topics";

/// What to do when `texts` and `labels` have different lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthPolicy {
    /// Process the common prefix, warn, and report how many items were dropped.
    #[default]
    Truncate,
    /// Fail before any embedding request is made.
    Reject,
}

/// Configuration for batch population
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Metadata key for the per-text label
    pub label_key: String,

    /// Handling of mismatched `texts` / `labels` lengths
    pub length_policy: LengthPolicy,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            label_key: DEFAULT_LABEL_KEY.to_string(),
            length_policy: LengthPolicy::Truncate,
        }
    }
}

impl BuilderConfig {
    /// Reject mismatched lengths instead of truncating
    #[must_use]
    pub fn strict() -> Self {
        Self {
            length_policy: LengthPolicy::Reject,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.label_key.trim().is_empty() {
            return Err(VectorStoreError::invalid_config("label_key must not be empty"));
        }
        Ok(())
    }
}

/// Outcome of one population run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    /// Pairs embedded and inserted.
    pub processed: usize,
    /// Trailing texts or labels without a partner.
    pub dropped: usize,
    /// Inserts that overwrote a key already present, either from an earlier
    /// run or from a repeated text in this batch.
    pub duplicates: usize,
}

/// Populates a [`VectorStore`] from raw texts through one batched embedding
/// request.
///
/// Each text is its own key, so repeated texts collapse into one entry and
/// the last label wins.
pub struct StoreBuilder {
    embedder: Arc<dyn EmbeddingProvider>,
    config: BuilderConfig,
}

impl StoreBuilder {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder,
            config: BuilderConfig::default(),
        }
    }

    pub fn with_config(
        embedder: Arc<dyn EmbeddingProvider>,
        config: BuilderConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self { embedder, config })
    }

    #[must_use]
    pub const fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Build a fresh store from `texts` paired with `labels`.
    pub async fn build_from_texts(
        &self,
        texts: &[String],
        labels: &[String],
    ) -> Result<VectorStore> {
        let mut store = VectorStore::with_capacity(texts.len().min(labels.len()));
        self.populate(&mut store, texts, labels).await?;
        Ok(store)
    }

    /// Embed `texts` in one batch and insert them into `store`.
    ///
    /// Nothing is inserted unless the whole batch succeeds and the provider
    /// returns one vector per text.
    pub async fn populate(
        &self,
        store: &mut VectorStore,
        texts: &[String],
        labels: &[String],
    ) -> Result<BuildReport> {
        let paired = texts.len().min(labels.len());
        let dropped = texts.len().max(labels.len()) - paired;

        if dropped > 0 {
            match self.config.length_policy {
                LengthPolicy::Reject => {
                    return Err(VectorStoreError::LengthMismatch {
                        texts: texts.len(),
                        labels: labels.len(),
                    });
                }
                LengthPolicy::Truncate => {
                    log::warn!(
                        "{} texts but {} labels; dropping {} unpaired item(s)",
                        texts.len(),
                        labels.len(),
                        dropped
                    );
                }
            }
        }

        let texts = &texts[..paired];
        let labels = &labels[..paired];
        if texts.is_empty() {
            return Ok(BuildReport {
                processed: 0,
                dropped,
                duplicates: 0,
            });
        }

        log::info!(
            "Embedding {} texts with '{}' provider",
            texts.len(),
            self.embedder.name()
        );
        let vectors = self.embedder.embed_batch(texts).await?;
        if vectors.len() != texts.len() {
            return Err(VectorStoreError::ProviderContract {
                expected: texts.len(),
                actual: vectors.len(),
            });
        }

        let mut duplicates = 0;
        let mut seen = HashSet::with_capacity(texts.len());
        for ((text, label), vector) in texts.iter().zip(labels).zip(vectors) {
            if !seen.insert(text.as_str()) || !store.retrieve(text).is_absent() {
                duplicates += 1;
                log::debug!("Overwriting existing entry for text {:?}", truncate_for_log(text));
            }
            let metadata = Metadata::from([(self.config.label_key.clone(), label.clone())]);
            store.insert(text.clone(), vector, Some(metadata));
        }

        log::info!("Successfully added texts. Total: {}", store.len());
        Ok(BuildReport {
            processed: texts.len(),
            dropped,
            duplicates,
        })
    }
}

fn truncate_for_log(text: &str) -> String {
    const MAX_CHARS: usize = 48;
    if text.chars().count() <= MAX_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(MAX_CHARS).collect();
    format!("{head}...")
}
