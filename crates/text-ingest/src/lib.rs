//! # textvec ingest
//!
//! Turns files on disk into ordered text chunks ready for embedding.
//!
//! ```text
//! path (file | directory)
//!     │
//!     ├──> TextLoader        -> Document[] (sorted, UTF-8)
//!     │
//!     └──> CharacterTextSplitter
//!            └─> chunks of <= chunk_size chars, chunk_overlap shared
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use textvec_ingest::{CharacterTextSplitter, SplitterConfig, TextLoader};
//!
//! let docs = TextLoader::new("data/KingLear.txt").load_texts()?;
//! let splitter = CharacterTextSplitter::new(SplitterConfig::default())?;
//! let chunks = splitter.split_texts(&docs);
//! println!("{} chunks", chunks.len());
//! # Ok::<(), textvec_ingest::IngestError>(())
//! ```

mod config;
mod error;
mod loader;
mod splitter;

pub use config::{LoaderConfig, SplitterConfig};
pub use error::{IngestError, Result};
pub use loader::{Document, TextLoader};
pub use splitter::CharacterTextSplitter;
