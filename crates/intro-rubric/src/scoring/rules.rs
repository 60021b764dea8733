use super::result::{MetricScore, MetricValue};
use crate::features::ExtractedFeatures;
use crate::rubric::{match_bucket, Metric, MetricKey, ScoringRule};
use tracing::warn;

/// Raw reading of the feature a metric is scored on.
pub(crate) struct Observation {
    pub raw: f64,
    pub value: MetricValue,
}

pub(crate) fn observe(key: MetricKey, features: &ExtractedFeatures) -> Observation {
    match key {
        MetricKey::Salutation => flag(features.has_salutation),
        MetricKey::Flow => flag(features.has_flow),
        MetricKey::KeywordPresence => Observation {
            raw: features.keywords_found as f64,
            value: MetricValue::Text(format!(
                "{}/{}",
                features.keywords_found,
                features.keyword_total()
            )),
        },
        MetricKey::SpeechRate => decimal(features.words_per_minute),
        MetricKey::Grammar => decimal(features.grammar_score_raw),
        MetricKey::Vocabulary => decimal(features.type_token_ratio),
        MetricKey::FillerRate => Observation {
            raw: features.filler_rate_percent,
            value: MetricValue::Text(format!(
                "{:.2}% ({} filler words)",
                features.filler_rate_percent, features.filler_count
            )),
        },
    }
}

fn flag(present: bool) -> Observation {
    Observation {
        raw: if present { 1.0 } else { 0.0 },
        value: MetricValue::flag(present),
    }
}

fn decimal(raw: f64) -> Observation {
    Observation {
        raw,
        value: MetricValue::Text(format!("{raw:.2}")),
    }
}

pub(crate) fn score_metric(metric: &Metric, features: &ExtractedFeatures) -> MetricScore {
    let Observation { raw, value } = observe(metric.key, features);

    let (score, feedback) = match &metric.rule {
        ScoringRule::Threshold {
            pass_score,
            threshold,
            pass_feedback,
            fail_feedback,
        } => {
            if raw >= f64::from(*threshold) {
                (*pass_score, pass_feedback.to_string())
            } else {
                (0, fail_feedback.to_string())
            }
        }
        ScoringRule::KeywordCount {
            max_score,
            keywords,
        } => {
            let score = keyword_score(*max_score, features.keywords_found, keywords.len());
            let feedback = format!(
                "Found {} out of {} key self-introduction details. (Missing: {})",
                features.keywords_found,
                keywords.len(),
                features.missing_keywords().join(", ")
            );
            (score, feedback)
        }
        ScoringRule::Buckets(rule) => {
            let found = match_bucket(raw, rule);
            if found.fallback {
                warn!(
                    metric = metric.name,
                    value = raw,
                    range = %found.bucket.range.label(rule.unit),
                    "no bucket matched; using last bucket"
                );
            }
            (found.score(), found.feedback().to_string())
        }
    };

    MetricScore {
        name: metric.name,
        value,
        score,
        feedback,
        weight: metric.weight,
    }
}

/// `max_score * found / total`, floored.
pub(crate) fn keyword_score(max_score: u32, found: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let found = found.min(total) as u64;
    (u64::from(max_score) * found / total as u64) as u32
}
