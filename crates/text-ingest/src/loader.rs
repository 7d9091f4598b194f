use crate::config::LoaderConfig;
use crate::error::{IngestError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions that are recognised as documents but have no extractor here.
const UNSUPPORTED_FORMATS: &[&str] = &["pdf"];

/// One loaded text document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// File the text was read from
    pub source: PathBuf,

    /// Full UTF-8 content
    pub content: String,
}

impl Document {
    /// File name of the source, used as a human-readable label
    #[must_use]
    pub fn label(&self) -> String {
        self.source
            .file_name()
            .map_or_else(
                || self.source.display().to_string(),
                |name| name.to_string_lossy().into_owned(),
            )
    }
}

/// Loads text documents from a single file or a directory tree.
///
/// The source path is classified before anything is read: a directory, a
/// file with an accepted extension, or an error. Read failures are returned
/// with the offending path rather than skipped.
#[derive(Debug, Clone)]
pub struct TextLoader {
    path: PathBuf,
    config: LoaderConfig,
}

impl TextLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config: LoaderConfig::default(),
        }
    }

    pub fn with_config(path: impl AsRef<Path>, config: LoaderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            config,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<Document>> {
        if self.path.is_dir() {
            return self.load_directory();
        }

        if self.path.is_file() {
            let extension = extension_of(&self.path);
            if self.config.accepts(&extension) {
                return Ok(vec![read_document(&self.path)?]);
            }
            if UNSUPPORTED_FORMATS.contains(&extension.as_str()) {
                return Err(IngestError::UnsupportedFormat {
                    path: self.path.clone(),
                    format: extension,
                });
            }
        }

        Err(IngestError::InvalidSource(self.path.clone()))
    }

    /// Convenience: load and return only the contents
    pub fn load_texts(&self) -> Result<Vec<String>> {
        Ok(self.load()?.into_iter().map(|doc| doc.content).collect())
    }

    fn load_directory(&self) -> Result<Vec<Document>> {
        log::info!("Loading documents from {}", self.path.display());
        let mut documents = Vec::new();

        let walker = WalkDir::new(&self.path)
            .follow_links(self.config.follow_links)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|err| {
                let path = err
                    .path()
                    .map_or_else(|| self.path.clone(), Path::to_path_buf);
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
                IngestError::io(path, source)
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            if !self.config.accepts(&extension_of(entry.path())) {
                log::debug!("Skipping {}", entry.path().display());
                continue;
            }
            documents.push(read_document(entry.path())?);
        }

        log::info!("Loaded {} documents", documents.len());
        Ok(documents)
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
}

fn read_document(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path).map_err(|err| IngestError::io(path, err))?;
    Ok(Document {
        source: path.to_path_buf(),
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn document_label_is_file_name() {
        let doc = Document {
            source: PathBuf::from("data/KingLear.txt"),
            content: String::new(),
        };
        assert_eq!(doc.label(), "KingLear.txt");
    }

    #[test]
    fn loads_single_text_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "hello").unwrap();

        let docs = TextLoader::new(&path).load().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "hello");
        assert_eq!(docs[0].source, path);
    }

    #[test]
    fn rejects_pdf_as_unsupported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("paper.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let err = TextLoader::new(&path).load().unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedFormat { ref format, .. } if format == "pdf"
        ));
    }

    #[test]
    fn rejects_other_files_and_missing_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "a,b").unwrap();

        assert!(matches!(
            TextLoader::new(&path).load(),
            Err(IngestError::InvalidSource(_))
        ));
        assert!(matches!(
            TextLoader::new(dir.path().join("nope")).load(),
            Err(IngestError::InvalidSource(_))
        ));
    }

    #[test]
    fn invalid_utf8_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        match TextLoader::new(dir.path()).load() {
            Err(IngestError::Io { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
