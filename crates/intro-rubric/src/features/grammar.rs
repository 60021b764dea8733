/// Errors-per-100-words rate used when no real grammar checker is configured.
pub const DEFAULT_ERRORS_PER_100_WORDS: f64 = 0.8;

/// Source of the grammar error rate feeding the grammar metric.
pub trait GrammarEstimator: Send + Sync {
    fn errors_per_100_words(&self, transcript: &str, words: &[String]) -> f64;
}

/// Placeholder estimator reporting the same error rate for every transcript.
///
/// The grammar metric is not derived from the transcript; swapping in a genuine checker means
/// providing another [`GrammarEstimator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedErrorRate {
    pub errors_per_100_words: f64,
}

impl Default for FixedErrorRate {
    fn default() -> Self {
        Self {
            errors_per_100_words: DEFAULT_ERRORS_PER_100_WORDS,
        }
    }
}

impl GrammarEstimator for FixedErrorRate {
    fn errors_per_100_words(&self, _transcript: &str, _words: &[String]) -> f64 {
        self.errors_per_100_words
    }
}

/// Maps an error rate onto the 0..=1 grammar score the rubric buckets expect.
pub fn grammar_score_raw(errors_per_100_words: f64) -> f64 {
    1.0 - (errors_per_100_words / 10.0).min(1.0)
}
