//! Similarity metrics used to rank stored vectors against a query.
//!
//! Every metric is oriented so that a higher score means "closer". Distances
//! such as Euclidean are therefore exposed negated.

use crate::error::VectorStoreError;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Extension point for metrics that are not built in.
///
/// Implementations must be pure: the same inputs always give the same score.
/// Callers guarantee `a.len() == b.len()`.
pub trait Similarity: Send + Sync {
    fn score(&self, a: &[f32], b: &[f32]) -> f32;

    fn name(&self) -> &str;
}

/// Metric selector passed to searches.
#[derive(Clone, Default)]
pub enum SimilarityMetric {
    /// `dot(a, b) / (|a| * |b|)`; NaN when either norm is zero.
    #[default]
    Cosine,
    /// Unnormalized dot product.
    DotProduct,
    /// Negated Euclidean distance, so identical vectors score 0 and
    /// everything else scores below it.
    Euclidean,
    Custom(Arc<dyn Similarity>),
}

impl SimilarityMetric {
    pub fn custom(metric: impl Similarity + 'static) -> Self {
        Self::Custom(Arc::new(metric))
    }

    #[must_use]
    pub fn score(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            Self::Cosine => cosine_similarity(a, b),
            Self::DotProduct => dot_product(a, b),
            Self::Euclidean => -euclidean_distance(a, b),
            Self::Custom(metric) => metric.score(a, b),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Cosine => "cosine",
            Self::DotProduct => "dot",
            Self::Euclidean => "euclidean",
            Self::Custom(metric) => metric.name(),
        }
    }
}

impl fmt::Debug for SimilarityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(metric) => f.debug_tuple("Custom").field(&metric.name()).finish(),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for SimilarityMetric {
    type Err = VectorStoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cosine" => Ok(Self::Cosine),
            "dot" | "dot_product" | "dot-product" => Ok(Self::DotProduct),
            "euclidean" | "l2" => Ok(Self::Euclidean),
            other => Err(VectorStoreError::invalid_config(format!(
                "Unsupported metric '{other}' (expected 'cosine', 'dot' or 'euclidean')"
            ))),
        }
    }
}

#[must_use]
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Cosine similarity. A zero-norm input yields NaN rather than a made-up
/// score; the store ranks NaN below every real score.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return f32::NAN;
    }

    dot_product(a, b) / (norm_a * norm_b)
}

#[must_use]
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        let sim = cosine_similarity(&a, &b);
        assert!((sim - 1.0).abs() < 1e-6);

        let c = vec![1.0, 0.0];
        let d = vec![0.0, 1.0];
        let sim2 = cosine_similarity(&c, &d);
        assert!((sim2 - 0.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_self_similarity_is_one() {
        for v in [vec![3.0, 4.0], vec![-1.5, 2.0, 0.25], vec![1e-3, 7.0, -2.0, 9.5]] {
            let sim = cosine_similarity(&v, &v);
            assert!((sim - 1.0).abs() < 1e-5, "sim({v:?}, {v:?}) = {sim}");
        }
    }

    #[test]
    fn cosine_is_symmetric() {
        let a = [0.3, -1.2, 4.0];
        let b = [2.0, 0.5, -0.7];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn cosine_zero_norm_is_nan() {
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]).is_nan());
        assert!(cosine_similarity(&[1.0, 2.0], &[0.0, 0.0]).is_nan());
    }

    #[test]
    fn euclidean_is_negated_distance() {
        let metric = SimilarityMetric::Euclidean;
        assert_eq!(metric.score(&[1.0, 1.0], &[1.0, 1.0]), 0.0);
        assert!((metric.score(&[0.0, 0.0], &[3.0, 4.0]) + 5.0).abs() < 1e-6);
    }

    #[test]
    fn dot_product_is_unnormalized() {
        let metric = SimilarityMetric::DotProduct;
        assert_eq!(metric.score(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
    }

    #[test]
    fn custom_metric_is_dispatched() {
        struct Manhattan;

        impl Similarity for Manhattan {
            fn score(&self, a: &[f32], b: &[f32]) -> f32 {
                -a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum::<f32>()
            }

            fn name(&self) -> &str {
                "manhattan"
            }
        }

        let metric = SimilarityMetric::custom(Manhattan);
        assert_eq!(metric.name(), "manhattan");
        assert_eq!(metric.score(&[1.0, 2.0], &[2.0, 0.0]), -3.0);
        assert_eq!(format!("{metric:?}"), "Custom(\"manhattan\")");
    }

    #[test]
    fn parses_metric_names() {
        assert_eq!("cosine".parse::<SimilarityMetric>().unwrap().name(), "cosine");
        assert_eq!("Dot".parse::<SimilarityMetric>().unwrap().name(), "dot");
        assert_eq!("l2".parse::<SimilarityMetric>().unwrap().name(), "euclidean");
        assert!("hamming".parse::<SimilarityMetric>().is_err());
    }
}
