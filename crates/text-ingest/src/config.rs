use crate::error::{IngestError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for fixed-size character chunking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    /// Maximum chunk length in characters
    pub chunk_size: usize,

    /// Characters shared with the preceding chunk
    pub chunk_overlap: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

impl SplitterConfig {
    #[must_use]
    pub const fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Distance between the starts of consecutive chunks, zero for an
    /// invalid configuration
    #[must_use]
    pub(crate) const fn step(&self) -> usize {
        self.chunk_size.saturating_sub(self.chunk_overlap)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(IngestError::invalid_config("chunk_size must be > 0"));
        }

        if self.chunk_size <= self.chunk_overlap {
            return Err(IngestError::invalid_config(format!(
                "chunk_size ({}) must be greater than chunk_overlap ({})",
                self.chunk_size, self.chunk_overlap
            )));
        }

        Ok(())
    }
}

/// Configuration for document loading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// File extensions (without the dot) read as plain text
    pub extensions: Vec<String>,

    /// Follow symbolic links while walking directories
    pub follow_links: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["txt".to_string()],
            follow_links: false,
        }
    }
}

impl LoaderConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(IngestError::invalid_config(
                "at least one text extension is required",
            ));
        }
        if let Some(bad) = self
            .extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(IngestError::invalid_config(format!(
                "extension '{bad}' must be non-empty and given without a leading dot"
            )));
        }
        Ok(())
    }

    pub(crate) fn accepts(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
