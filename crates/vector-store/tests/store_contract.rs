use pretty_assertions::assert_eq;
use std::sync::Arc;
use textvec_store::{
    BuilderConfig, EmbeddingProvider, Metadata, SemanticIndex, SimilarityMetric, StoreBuilder,
    StubEmbedder, VectorStore, VectorStoreError,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// Unit vector whose cosine against `[1, 0]` is `sim`.
fn at_similarity(sim: f32) -> Vec<f32> {
    vec![sim, (1.0 - sim * sim).sqrt()]
}

#[test]
fn top_k_returns_best_matches_with_exact_scores() {
    let mut store = VectorStore::new();
    store.insert("e3", at_similarity(0.1), None);
    store.insert("e1", at_similarity(0.9), None);
    store.insert("e2", at_similarity(0.5), None);

    let results = store
        .search(&[1.0, 0.0], 2, &SimilarityMetric::Cosine)
        .expect("search");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].key, "e1");
    assert_eq!(results[1].key, "e2");
    assert!((results[0].score - 0.9).abs() < 1e-6);
    assert!((results[1].score - 0.5).abs() < 1e-6);
}

#[test]
fn result_length_is_min_of_k_and_size() {
    let mut store = VectorStore::new();
    for i in 0..4 {
        store.insert(format!("k{i}"), vec![i as f32 + 1.0, 1.0], None);
    }

    for k in 0..7 {
        let results = store
            .search(&[1.0, 1.0], k, &SimilarityMetric::Cosine)
            .expect("search");
        assert_eq!(results.len(), k.min(store.len()), "k = {k}");
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}

#[test]
fn empty_store_scenario() {
    let store = VectorStore::new();
    assert!(store
        .search(&[0.2, 0.4, 0.6], 5, &SimilarityMetric::Cosine)
        .expect("search")
        .is_empty());

    let found = store.retrieve("missing");
    assert_eq!(found.vector, None);
    assert_eq!(found.metadata, None);
}

#[test]
fn every_metric_prefers_identical_vector() {
    let mut store = VectorStore::new();
    store.insert("target", vec![0.5, 0.5, 0.0], None);
    store.insert("other", vec![-0.5, 0.1, 0.9], None);

    for metric in [
        SimilarityMetric::Cosine,
        SimilarityMetric::DotProduct,
        SimilarityMetric::Euclidean,
    ] {
        let top = store.search(&[0.5, 0.5, 0.0], 1, &metric).expect("search");
        assert_eq!(top[0].key, "target", "metric {metric:?}");
    }
}

#[test]
fn metadata_persists_from_latest_supplied_insert() {
    let mut store = VectorStore::new();
    let first = Metadata::from([("tag".to_string(), "one".to_string())]);
    let second = Metadata::from([("tag".to_string(), "two".to_string())]);

    store.insert("k", vec![1.0], Some(first));
    store.insert("k", vec![2.0], Some(second.clone()));
    store.insert("k", vec![3.0], None);

    let found = store.retrieve("k");
    assert_eq!(found.vector, Some(&[3.0][..]));
    assert_eq!(found.metadata, Some(&second));
}

#[test]
fn query_dimension_mismatch_is_an_error() {
    let mut store = VectorStore::new();
    store.insert("a", vec![1.0, 0.0, 0.0], None);

    let err = store
        .search(&[1.0, 0.0], 1, &SimilarityMetric::Cosine)
        .expect_err("mismatch");
    assert!(matches!(
        err,
        VectorStoreError::DimensionMismatch {
            expected: 2,
            actual: 3,
            ..
        }
    ));
}

#[tokio::test]
async fn builder_collapses_duplicates_and_truncates() {
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(StubEmbedder::new(16).expect("stub"));
    let builder = StoreBuilder::new(embedder);

    let store = builder
        .build_from_texts(
            &strings(&["a", "b", "a", "c"]),
            &strings(&["1", "2", "3", "4"]),
        )
        .await
        .expect("build");
    assert_eq!(store.len(), 3);

    let store = builder
        .build_from_texts(&strings(&["a", "b", "c", "d"]), &strings(&["1", "2"]))
        .await
        .expect("build");
    assert_eq!(store.keys().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[tokio::test]
async fn index_round_trip_with_stub_embedder() {
    let texts = strings(&[
        "I like to eat broccoli and bananas.",
        "I ate a banana and spinach smoothie for breakfast.",
        "Chinchillas and kittens are cute.",
        "My sister adopted a kitten yesterday.",
        "Look at this cute hamster munching on a piece of broccoli.",
    ]);
    let labels = strings(&["food", "food", "pets", "pets", "pets"]);

    let (index, report) = SemanticIndex::build_from_texts(
        Arc::new(StubEmbedder::new(64).expect("stub")),
        &texts,
        &labels,
        BuilderConfig::default(),
    )
    .await
    .expect("build");
    assert_eq!(report.processed, 5);
    assert_eq!(index.store().len(), 5);

    let found = index
        .search_texts(&texts[3], 2, &SimilarityMetric::Cosine)
        .expect("search");
    assert_eq!(found.len(), 2);
    assert_eq!(found[0], texts[3]);

    let retrieved = index.store().retrieve(&texts[0]);
    assert_eq!(
        retrieved.vector.map(<[f32]>::len),
        Some(index.embedder().dimension())
    );
}
