use crate::builder::{BuildReport, BuilderConfig, StoreBuilder};
use crate::embeddings::EmbeddingProvider;
use crate::error::Result;
use crate::metric::SimilarityMetric;
use crate::store::VectorStore;
use crate::types::{ScoredKey, SearchHit};
use std::sync::Arc;

/// A [`VectorStore`] paired with the provider that embedded it, so it can be
/// queried with free text.
pub struct SemanticIndex {
    store: VectorStore,
    builder: StoreBuilder,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl SemanticIndex {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            store: VectorStore::new(),
            builder: StoreBuilder::new(embedder.clone()),
            embedder,
        }
    }

    pub fn with_config(
        embedder: Arc<dyn EmbeddingProvider>,
        config: BuilderConfig,
    ) -> Result<Self> {
        Ok(Self {
            store: VectorStore::new(),
            builder: StoreBuilder::with_config(embedder.clone(), config)?,
            embedder,
        })
    }

    /// Build an index from `texts` paired with `labels`.
    pub async fn build_from_texts(
        embedder: Arc<dyn EmbeddingProvider>,
        texts: &[String],
        labels: &[String],
        config: BuilderConfig,
    ) -> Result<(Self, BuildReport)> {
        let mut index = Self::with_config(embedder, config)?;
        let report = index.extend_from_texts(texts, labels).await?;
        Ok((index, report))
    }

    /// Embed and add more texts to this index.
    pub async fn extend_from_texts(
        &mut self,
        texts: &[String],
        labels: &[String],
    ) -> Result<BuildReport> {
        self.builder.populate(&mut self.store, texts, labels).await
    }

    /// Ranked `(key, score)` pairs for a free-text query.
    pub fn search_by_text(
        &self,
        query: &str,
        k: usize,
        metric: &SimilarityMetric,
    ) -> Result<Vec<ScoredKey>> {
        let vector = self.embedder.embed_one(query)?;
        self.store.search(&vector, k, metric)
    }

    pub fn search_by_text_with_metadata(
        &self,
        query: &str,
        k: usize,
        metric: &SimilarityMetric,
    ) -> Result<Vec<SearchHit>> {
        let vector = self.embedder.embed_one(query)?;
        self.store.search_with_metadata(&vector, k, metric)
    }

    /// Matching texts only, in rank order.
    pub fn search_texts(
        &self,
        query: &str,
        k: usize,
        metric: &SimilarityMetric,
    ) -> Result<Vec<String>> {
        Ok(self
            .search_by_text(query, k, metric)?
            .into_iter()
            .map(|hit| hit.key)
            .collect())
    }

    #[must_use]
    pub const fn store(&self) -> &VectorStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut VectorStore {
        &mut self.store
    }

    #[must_use]
    pub fn into_store(self) -> VectorStore {
        self.store
    }

    #[must_use]
    pub fn embedder(&self) -> &dyn EmbeddingProvider {
        self.embedder.as_ref()
    }
}
