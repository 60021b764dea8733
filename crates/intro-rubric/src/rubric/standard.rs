use super::catalog::{
    Bucket, BucketRule, Category, Metric, MetricKey, Polarity, RangePredicate, RangeUnit,
    RubricCatalog, RubricError, ScoringRule,
};
use crate::features::lexicon::content_keywords;

pub const CONTENT_AND_STRUCTURE: &str = "Content & Structure";
pub const SPEECH_RATE: &str = "Speech Rate";
pub const LANGUAGE_AND_GRAMMAR: &str = "Language & Grammar";
pub const CLARITY: &str = "Clarity";

pub const SALUTATION_LEVEL: &str = "Salutation Level";
pub const KEYWORD_PRESENCE: &str = "Key word Presence";
pub const FLOW: &str = "Flow";
pub const SPEECH_RATE_WPM: &str = "Speech rate (WPM)";
pub const GRAMMAR_ERRORS: &str = "Grammar errors (Score)";
pub const VOCABULARY_RICHNESS: &str = "Vocabulary richness (TTR)";
pub const FILLER_WORD_RATE: &str = "Filler Word Rate";

impl RubricCatalog {
    /// The self-introduction rubric: content 40, speech rate 10, language 20, clarity 30.
    pub fn standard() -> Result<Self, RubricError> {
        RubricCatalog::new(vec![
            content_and_structure(),
            speech_rate()?,
            language_and_grammar()?,
            clarity()?,
        ])
    }
}

fn bucket(range: RangePredicate, score: u32, feedback: &'static str) -> Bucket {
    Bucket {
        range,
        score,
        feedback,
    }
}

fn between(low: f64, high: f64) -> RangePredicate {
    RangePredicate::Between { low, high }
}

fn above(bound: f64) -> RangePredicate {
    RangePredicate::Above { bound }
}

fn below(bound: f64) -> RangePredicate {
    RangePredicate::Below { bound }
}

fn content_and_structure() -> Category {
    Category {
        name: CONTENT_AND_STRUCTURE,
        weight: 40,
        metrics: vec![
            Metric {
                key: MetricKey::Salutation,
                name: SALUTATION_LEVEL,
                weight: 5,
                rule: ScoringRule::Threshold {
                    pass_score: 5,
                    threshold: 1,
                    pass_feedback: "Clear salutation present.",
                    fail_feedback: "Missing a clear, engaging salutation.",
                },
            },
            Metric {
                key: MetricKey::KeywordPresence,
                name: KEYWORD_PRESENCE,
                weight: 30,
                rule: ScoringRule::KeywordCount {
                    max_score: 30,
                    keywords: content_keywords(),
                },
            },
            Metric {
                key: MetricKey::Flow,
                name: FLOW,
                weight: 5,
                rule: ScoringRule::Threshold {
                    pass_score: 5,
                    threshold: 1,
                    pass_feedback: "The introduction follows a logical start-to-end structure.",
                    fail_feedback: "The flow is hard to follow. Ensure a clear start and end.",
                },
            },
        ],
    }
}

fn speech_rate() -> Result<Category, RubricError> {
    // The ideal middle band is listed first; gaps (80, 110-111) fall through to the last bucket.
    let rule = BucketRule::new(
        SPEECH_RATE_WPM,
        Polarity::Canonical,
        RangeUnit::WordsPerMinute,
        vec![
            bucket(
                between(111.0, 140.0),
                10,
                "Excellent pace! Very comfortable for listening.",
            ),
            bucket(
                above(140.0),
                6,
                "A bit too fast. Try to slow down for better clarity.",
            ),
            bucket(
                between(81.0, 110.0),
                6,
                "A bit slow. Speed up slightly to keep listeners engaged.",
            ),
            bucket(
                below(80.0),
                2,
                "Too slow. The pace significantly impacts engagement.",
            ),
        ],
    )?;

    Ok(Category {
        name: SPEECH_RATE,
        weight: 10,
        metrics: vec![Metric {
            key: MetricKey::SpeechRate,
            name: SPEECH_RATE_WPM,
            weight: 10,
            rule: ScoringRule::Buckets(rule),
        }],
    })
}

fn language_and_grammar() -> Result<Category, RubricError> {
    let grammar = BucketRule::new(
        GRAMMAR_ERRORS,
        Polarity::HigherIsBetter,
        RangeUnit::Plain,
        vec![
            bucket(
                above(0.9),
                10,
                "Impeccable grammar. Very high quality language use.",
            ),
            bucket(
                between(0.7, 0.89),
                8,
                "Good grammar, only minor, non-distracting errors.",
            ),
            bucket(
                between(0.5, 0.69),
                6,
                "Average grammar, with a few noticeable errors.",
            ),
            bucket(
                between(0.3, 0.49),
                4,
                "Needs significant improvement in grammar and sentence structure.",
            ),
            bucket(
                below(0.3),
                2,
                "Severe grammar issues that compromise clarity.",
            ),
        ],
    )?;

    let vocabulary = BucketRule::new(
        VOCABULARY_RICHNESS,
        Polarity::HigherIsBetter,
        RangeUnit::Plain,
        vec![
            bucket(
                between(0.9, 1.0),
                10,
                "Excellent vocabulary richness (TTR). Diverse and engaging word choices.",
            ),
            bucket(
                between(0.7, 0.89),
                8,
                "Good vocabulary. Sufficient variation in word choice.",
            ),
            bucket(
                between(0.5, 0.69),
                6,
                "Acceptable vocabulary, but could be more diverse.",
            ),
            bucket(
                between(0.3, 0.49),
                4,
                "Low vocabulary richness. Repetitive and basic word usage.",
            ),
            bucket(
                between(0.0, 0.29),
                2,
                "Very low vocabulary richness, making the text monotonous.",
            ),
        ],
    )?;

    Ok(Category {
        name: LANGUAGE_AND_GRAMMAR,
        weight: 20,
        metrics: vec![
            Metric {
                key: MetricKey::Grammar,
                name: GRAMMAR_ERRORS,
                weight: 10,
                rule: ScoringRule::Buckets(grammar),
            },
            Metric {
                key: MetricKey::Vocabulary,
                name: VOCABULARY_RICHNESS,
                weight: 10,
                rule: ScoringRule::Buckets(vocabulary),
            },
        ],
    })
}

fn clarity() -> Result<Category, RubricError> {
    let rule = BucketRule::new(
        FILLER_WORD_RATE,
        Polarity::LowerIsBetter,
        RangeUnit::Percent,
        vec![
            bucket(
                below(1.0),
                30,
                "Exceptional clarity. No distracting filler words.",
            ),
            bucket(
                between(1.0, 1.9),
                25,
                "Very good clarity. Minimal use of filler words.",
            ),
            bucket(
                between(2.0, 2.9),
                20,
                "Good clarity. Filler usage is present but not excessive.",
            ),
            bucket(
                between(3.0, 3.9),
                15,
                "Average clarity. Reduce filler words for better impact.",
            ),
            bucket(
                between(4.0, 4.9),
                10,
                "Low clarity. Excessive filler words distract the listener.",
            ),
            bucket(
                above(5.0),
                5,
                "Very low clarity. The presentation is heavily disrupted by filler words.",
            ),
        ],
    )?;

    Ok(Category {
        name: CLARITY,
        weight: 30,
        metrics: vec![Metric {
            key: MetricKey::FillerRate,
            name: FILLER_WORD_RATE,
            weight: 30,
            rule: ScoringRule::Buckets(rule),
        }],
    })
}
