mod result;
mod rules;

pub use result::{CategoryScore, DetailedFeedback, MetricScore, MetricValue, OverallTier, ScoreResult};

use crate::features::{ExtractedFeatures, FeatureExtractor, FixedErrorRate, GrammarEstimator};
use crate::rubric::{RubricCatalog, RubricError};
use std::sync::Arc;
use tracing::debug;

/// Stateless scorer applying a shared rubric catalog to transcripts.
pub struct ScoringEngine<G = FixedErrorRate> {
    catalog: Arc<RubricCatalog>,
    extractor: FeatureExtractor<G>,
}

impl ScoringEngine<FixedErrorRate> {
    pub fn standard() -> Result<Self, RubricError> {
        Self::new(Arc::new(RubricCatalog::standard()?), FixedErrorRate::default())
    }
}

impl<G: GrammarEstimator> ScoringEngine<G> {
    pub fn new(catalog: Arc<RubricCatalog>, grammar: G) -> Result<Self, RubricError> {
        Ok(Self {
            catalog,
            extractor: FeatureExtractor::new(grammar)?,
        })
    }

    pub fn with_extractor(catalog: Arc<RubricCatalog>, extractor: FeatureExtractor<G>) -> Self {
        Self { catalog, extractor }
    }

    pub fn catalog(&self) -> &RubricCatalog {
        &self.catalog
    }

    pub fn extract(&self, transcript: &str, duration_sec: f64) -> ExtractedFeatures {
        self.extractor.extract(transcript, duration_sec)
    }

    pub fn score(&self, transcript: &str, duration_sec: f64) -> ScoreResult {
        let features = self.extract(transcript, duration_sec);
        self.score_features(&features)
    }

    pub fn score_features(&self, features: &ExtractedFeatures) -> ScoreResult {
        let categories: Vec<CategoryScore> = self
            .catalog
            .categories()
            .iter()
            .map(|category| {
                let metrics: Vec<MetricScore> = category
                    .metrics
                    .iter()
                    .map(|metric| rules::score_metric(metric, features))
                    .collect();
                CategoryScore {
                    name: category.name,
                    total_score: metrics.iter().map(|metric| metric.score).sum(),
                    metrics,
                }
            })
            .collect();

        let final_score = categories.iter().map(|category| category.total_score).sum();
        let tier = OverallTier::from_score(final_score);

        debug!(
            word_count = features.word_count,
            words_per_minute = features.words_per_minute,
            final_score,
            tier = tier.label(),
            "scored transcript"
        );

        ScoreResult {
            final_score,
            total_word_count: features.word_count,
            total_duration_sec: features.duration_sec,
            detailed_feedback: DetailedFeedback(categories),
            overall_feedback: tier.feedback().to_string(),
            tier,
        }
    }
}
