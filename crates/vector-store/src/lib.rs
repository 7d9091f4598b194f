//! # textvec store
//!
//! In-memory vector storage with exact k-nearest-neighbor search over text
//! embeddings.
//!
//! ## Features
//!
//! - **Exact top-k search** by linear scan, deterministic ordering
//! - **Pluggable metrics**: cosine (default), dot product, Euclidean, custom
//! - **Batch population** from raw text through one embedding request
//! - **Free-text queries** via [`SemanticIndex`]
//!
//! ## Architecture
//!
//! ```text
//! texts[] + labels[]
//!     │
//!     ├──> StoreBuilder
//!     │      └─> EmbeddingProvider::embed_batch (one request)
//!     │
//!     └──> VectorStore
//!            ├─> insert / retrieve
//!            └─> search (linear scan, SimilarityMetric)
//!
//! query text
//!     └──> SemanticIndex
//!            ├─> EmbeddingProvider::embed_one
//!            └─> VectorStore::search
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use textvec_store::{BuilderConfig, SemanticIndex, SimilarityMetric, StubEmbedder};
//!
//! #[tokio::main]
//! async fn main() -> textvec_store::Result<()> {
//!     let embedder = Arc::new(StubEmbedder::new(384)?);
//!     let texts = vec!["Sample text 1".to_string(), "Sample text 2".to_string()];
//!     let labels = vec!["Topic 1".to_string(), "Topic 2".to_string()];
//!
//!     let (index, _report) =
//!         SemanticIndex::build_from_texts(embedder, &texts, &labels, BuilderConfig::default())
//!             .await?;
//!
//!     let hits = index.search_by_text_with_metadata("Sample query", 2, &SimilarityMetric::Cosine)?;
//!     for hit in hits {
//!         println!("{}: {:.3} {:?}", hit.key, hit.score, hit.metadata);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod builder;
mod embeddings;
mod error;
mod index;
pub mod metric;
mod store;
mod types;

pub use builder::{BuildReport, BuilderConfig, LengthPolicy, StoreBuilder, DEFAULT_LABEL_KEY};
pub use embeddings::{EmbeddingProvider, StubEmbedder};
pub use error::{Result, VectorStoreError};
pub use index::SemanticIndex;
pub use metric::{Similarity, SimilarityMetric};
pub use store::VectorStore;
pub use types::{Metadata, Retrieved, ScoredKey, SearchHit};
