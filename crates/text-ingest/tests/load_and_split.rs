use pretty_assertions::assert_eq;
use tempfile::TempDir;
use textvec_ingest::{CharacterTextSplitter, LoaderConfig, SplitterConfig, TextLoader};

fn write(dir: &TempDir, rel: &str, content: &str) {
    let path = dir.path().join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create dirs");
    }
    std::fs::write(path, content).expect("write file");
}

#[test]
fn directory_walk_is_recursive_and_sorted() {
    let dir = TempDir::new().expect("tempdir");
    write(&dir, "b.txt", "second");
    write(&dir, "a.txt", "first");
    write(&dir, "nested/c.txt", "third");
    write(&dir, "nested/skip.md", "ignored");
    write(&dir, "paper.pdf", "%PDF");

    let texts = TextLoader::new(dir.path()).load_texts().expect("load");
    assert_eq!(texts, vec!["first", "second", "third"]);
}

#[test]
fn extra_extensions_are_loaded_when_configured() {
    let dir = TempDir::new().expect("tempdir");
    write(&dir, "a.txt", "plain");
    write(&dir, "b.md", "markdown");

    let config = LoaderConfig {
        extensions: vec!["txt".to_string(), "md".to_string()],
        ..Default::default()
    };
    let docs = TextLoader::with_config(dir.path(), config)
        .expect("config")
        .load()
        .expect("load");
    let labels: Vec<_> = docs.iter().map(|d| d.label()).collect();
    assert_eq!(labels, vec!["a.txt", "b.md"]);
}

#[test]
fn loaded_documents_split_into_bounded_chunks() {
    let dir = TempDir::new().expect("tempdir");
    let body = "All the world's a stage. ".repeat(20);
    write(&dir, "play.txt", &body);

    let docs = TextLoader::new(dir.path().join("play.txt"))
        .load_texts()
        .expect("load");
    let splitter = CharacterTextSplitter::new(SplitterConfig::new(100, 20)).expect("splitter");
    let chunks = splitter.split_texts(&docs);

    let total = body.chars().count();
    assert_eq!(chunks.len(), total.div_ceil(80));
    assert!(chunks.iter().all(|c| c.chars().count() <= 100));
    assert_eq!(chunks[0], body.chars().take(100).collect::<String>());
}

#[test]
fn splitter_config_fills_defaults_from_json() {
    let config: SplitterConfig = serde_json::from_str(r#"{"chunk_size": 500}"#).expect("json");
    assert_eq!(config, SplitterConfig::new(500, 200));
}
