use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use textvec_ingest::{CharacterTextSplitter, SplitterConfig, TextLoader};
use textvec_store::{
    BuildReport, BuilderConfig, EmbeddingProvider, ScoredKey, SearchHit, SemanticIndex,
    SimilarityMetric,
};

/// Chunks paired positionally with the label of the document they came from.
#[derive(Debug, Serialize)]
pub struct LabeledChunks {
    pub texts: Vec<String>,
    pub labels: Vec<String>,
}

impl LabeledChunks {
    pub fn len(&self) -> usize {
        self.texts.len()
    }
}

pub fn load_chunks(source: &Path, splitter: SplitterConfig) -> Result<LabeledChunks> {
    let splitter = CharacterTextSplitter::new(splitter).context("Invalid chunking options")?;
    let documents = TextLoader::new(source)
        .load()
        .with_context(|| format!("Failed to load documents from {}", source.display()))?;

    let mut texts = Vec::new();
    let mut labels = Vec::new();
    for document in &documents {
        let label = document.label();
        for chunk in splitter.split(&document.content) {
            texts.push(chunk);
            labels.push(label.clone());
        }
    }

    log::info!(
        "Split {} documents into {} chunks",
        documents.len(),
        texts.len()
    );
    Ok(LabeledChunks { texts, labels })
}

/// Labels listed one per line. Blank lines are skipped.
pub fn read_labels(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read labels from {}", path.display()))?;
    let labels: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    log::info!("Read {} labels from {}", labels.len(), path.display());
    Ok(labels)
}

pub async fn build_index(
    chunks: &LabeledChunks,
    embedder: Arc<dyn EmbeddingProvider>,
    config: BuilderConfig,
) -> Result<(SemanticIndex, BuildReport)> {
    SemanticIndex::build_from_texts(embedder, &chunks.texts, &chunks.labels, config)
        .await
        .context("Failed to build vector index")
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum QueryResults {
    Texts(Vec<String>),
    Scored(Vec<ScoredKey>),
    WithMetadata(Vec<SearchHit>),
}

impl QueryResults {
    pub fn len(&self) -> usize {
        match self {
            Self::Texts(items) => items.len(),
            Self::Scored(items) => items.len(),
            Self::WithMetadata(items) => items.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    Texts,
    Scored,
    WithMetadata,
}

pub fn run_query(
    index: &SemanticIndex,
    query: &str,
    k: usize,
    metric: &SimilarityMetric,
    shape: ResultShape,
) -> Result<QueryResults> {
    let results = match shape {
        ResultShape::Texts => QueryResults::Texts(index.search_texts(query, k, metric)?),
        ResultShape::Scored => QueryResults::Scored(index.search_by_text(query, k, metric)?),
        ResultShape::WithMetadata => {
            QueryResults::WithMetadata(index.search_by_text_with_metadata(query, k, metric)?)
        }
    };
    Ok(results)
}
