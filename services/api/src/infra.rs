use intro_rubric::config::ScoringConfig;
use intro_rubric::features::FixedErrorRate;
use intro_rubric::rubric::{RubricCatalog, RubricError};
use intro_rubric::ScoringEngine;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<ScoringEngine>,
    pub(crate) scoring: ScoringConfig,
}

/// Builds the engine once per process; the catalog is shared read-only by every request.
pub(crate) fn build_engine(scoring: &ScoringConfig) -> Result<ScoringEngine, RubricError> {
    let catalog = Arc::new(RubricCatalog::standard()?);
    ScoringEngine::new(
        catalog,
        FixedErrorRate {
            errors_per_100_words: scoring.grammar_errors_per_100_words,
        },
    )
}
