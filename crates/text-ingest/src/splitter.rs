use crate::config::SplitterConfig;
use crate::error::Result;
use std::iter;

/// Splits text into fixed-size character windows with overlap.
///
/// A window starts every `chunk_size - chunk_overlap` characters and holds
/// at most `chunk_size` characters, so the tail of a text may appear in more
/// than one short chunk. Lengths are counted in `char`s; a code point is
/// never cut in half.
#[derive(Debug, Clone)]
pub struct CharacterTextSplitter {
    config: SplitterConfig,
}

impl CharacterTextSplitter {
    pub fn new(config: SplitterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &SplitterConfig {
        &self.config
    }

    #[must_use]
    pub fn split(&self, text: &str) -> Vec<String> {
        let offsets: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(iter::once(text.len()))
            .collect();
        let char_count = offsets.len() - 1;

        (0..char_count)
            .step_by(self.config.step())
            .map(|start| {
                let end = (start + self.config.chunk_size).min(char_count);
                text[offsets[start]..offsets[end]].to_string()
            })
            .collect()
    }

    /// Split every text and concatenate the chunks in input order.
    #[must_use]
    pub fn split_texts<S: AsRef<str>>(&self, texts: &[S]) -> Vec<String> {
        let chunks: Vec<String> = texts
            .iter()
            .flat_map(|text| self.split(text.as_ref()))
            .collect();
        log::debug!("Split {} texts into {} chunks", texts.len(), chunks.len());
        chunks
    }
}
