use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Highest final score the canonical rubric can award.
pub const MAX_SCORE: u32 = 100;

#[derive(Debug, Error, PartialEq)]
pub enum RubricError {
    #[error("metric '{metric}' has no scoring buckets")]
    EmptyBuckets { metric: &'static str },
    #[error("metric '{metric}' awards at most {max_score} points but is weighted {weight}")]
    MetricWeightMismatch {
        metric: &'static str,
        weight: u32,
        max_score: u32,
    },
    #[error("category '{category}' is weighted {declared} but its metrics sum to {metrics}")]
    CategoryWeightMismatch {
        category: &'static str,
        declared: u32,
        metrics: u32,
    },
    #[error("rubric weights sum to {actual}, expected {expected}")]
    TotalWeightMismatch { expected: u32, actual: u32 },
    #[error("invalid transcript pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Identifies which extracted feature drives a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    Salutation,
    KeywordPresence,
    Flow,
    SpeechRate,
    Grammar,
    Vocabulary,
    FillerRate,
}

/// How a bucket range is rendered for humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeUnit {
    Plain,
    Percent,
    WordsPerMinute,
}

/// Range guard on a bucket, fixed when the catalog is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RangePredicate {
    /// `value > bound`
    Above { bound: f64 },
    /// `value < bound`
    Below { bound: f64 },
    /// `low <= value <= high`
    Between { low: f64, high: f64 },
}

impl RangePredicate {
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            RangePredicate::Above { bound } => value > bound,
            RangePredicate::Below { bound } => value < bound,
            RangePredicate::Between { low, high } => low <= value && value <= high,
        }
    }

    pub fn label(&self, unit: RangeUnit) -> String {
        match (*self, unit) {
            (RangePredicate::Above { bound }, RangeUnit::WordsPerMinute) => {
                format!("> {bound:.0} WPM")
            }
            (RangePredicate::Below { bound }, RangeUnit::WordsPerMinute) => {
                format!("< {bound:.0} WPM")
            }
            (RangePredicate::Between { low, high }, RangeUnit::WordsPerMinute) => {
                format!("{low:.0} - {high:.0} WPM")
            }
            (RangePredicate::Above { bound }, RangeUnit::Percent) => format!("> {bound:.1}%"),
            (RangePredicate::Below { bound }, RangeUnit::Percent) => format!("< {bound:.1}%"),
            (RangePredicate::Between { low, high }, RangeUnit::Percent) => {
                format!("{low:.1}% - {high:.1}%")
            }
            (RangePredicate::Above { bound }, RangeUnit::Plain) => {
                format!("> {}", plain_bound(bound))
            }
            (RangePredicate::Below { bound }, RangeUnit::Plain) => {
                format!("< {}", plain_bound(bound))
            }
            (RangePredicate::Between { low, high }, RangeUnit::Plain) => {
                format!("{}–{}", plain_bound(low), plain_bound(high))
            }
        }
    }
}

/// Ratio bounds keep one decimal for whole numbers ("1.0") except zero.
fn plain_bound(value: f64) -> String {
    if value != 0.0 && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Which direction of the raw value the rubric rewards. Descriptive only: bucket order in the
/// catalog always decides precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
    /// Best value sits inside the domain, so the ideal bucket is listed first.
    Canonical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub range: RangePredicate,
    pub score: u32,
    pub feedback: &'static str,
}

/// Ordered buckets with a guaranteed last entry used as the fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketRule {
    pub polarity: Polarity,
    pub unit: RangeUnit,
    leading: Vec<Bucket>,
    last: Bucket,
}

impl BucketRule {
    pub fn new(
        metric: &'static str,
        polarity: Polarity,
        unit: RangeUnit,
        mut buckets: Vec<Bucket>,
    ) -> Result<Self, RubricError> {
        let last = buckets.pop().ok_or(RubricError::EmptyBuckets { metric })?;
        Ok(Self {
            polarity,
            unit,
            leading: buckets,
            last,
        })
    }

    /// Buckets in catalog order.
    pub fn buckets(&self) -> impl Iterator<Item = &Bucket> {
        self.leading.iter().chain(std::iter::once(&self.last))
    }

    pub fn fallback(&self) -> &Bucket {
        &self.last
    }

    pub fn max_score(&self) -> u32 {
        self.leading
            .iter()
            .map(|bucket| bucket.score)
            .fold(self.last.score, u32::max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScoringRule {
    /// Full points when the observed count meets the threshold.
    Threshold {
        pass_score: u32,
        threshold: u32,
        pass_feedback: &'static str,
        fail_feedback: &'static str,
    },
    /// Points scaled by how many of the keywords were covered, floored.
    KeywordCount {
        max_score: u32,
        keywords: Vec<&'static str>,
    },
    Buckets(BucketRule),
}

impl ScoringRule {
    pub fn max_score(&self) -> u32 {
        match self {
            ScoringRule::Threshold { pass_score, .. } => *pass_score,
            ScoringRule::KeywordCount { max_score, .. } => *max_score,
            ScoringRule::Buckets(rule) => rule.max_score(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub key: MetricKey,
    pub name: &'static str,
    pub weight: u32,
    pub rule: ScoringRule,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: &'static str,
    pub weight: u32,
    pub metrics: Vec<Metric>,
}

impl Category {
    pub fn metric_weight(&self) -> u32 {
        self.metrics.iter().map(|metric| metric.weight).sum()
    }
}

/// Immutable rubric: categories, their metrics, and each metric's scoring rule, in
/// evaluation order.
#[derive(Debug, Clone, PartialEq)]
pub struct RubricCatalog {
    categories: Vec<Category>,
}

impl RubricCatalog {
    /// Builds a catalog, rejecting one whose weights do not add up to [`MAX_SCORE`].
    pub fn new(categories: Vec<Category>) -> Result<Self, RubricError> {
        let catalog = Self { categories };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), RubricError> {
        for category in &self.categories {
            for metric in &category.metrics {
                let max_score = metric.rule.max_score();
                if max_score != metric.weight {
                    return Err(RubricError::MetricWeightMismatch {
                        metric: metric.name,
                        weight: metric.weight,
                        max_score,
                    });
                }
            }

            let metrics = category.metric_weight();
            if metrics != category.weight {
                return Err(RubricError::CategoryWeightMismatch {
                    category: category.name,
                    declared: category.weight,
                    metrics,
                });
            }
        }

        let actual = self.total_weight();
        if actual != MAX_SCORE {
            return Err(RubricError::TotalWeightMismatch {
                expected: MAX_SCORE,
                actual,
            });
        }

        Ok(())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    pub fn metric(&self, category: &str, metric: &str) -> Option<&Metric> {
        self.category(category)?
            .metrics
            .iter()
            .find(|candidate| candidate.name == metric)
    }

    pub fn total_weight(&self) -> u32 {
        self.categories.iter().map(|category| category.weight).sum()
    }
}

impl fmt::Display for RubricCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for category in &self.categories {
            writeln!(f, "{} ({} pts)", category.name, category.weight)?;
            for metric in &category.metrics {
                writeln!(f, "  {} ({} pts)", metric.name, metric.weight)?;
                if let ScoringRule::Buckets(rule) = &metric.rule {
                    for bucket in rule.buckets() {
                        writeln!(
                            f,
                            "    {:<16} {:>2}  {}",
                            bucket.range.label(rule.unit),
                            bucket.score,
                            bucket.feedback
                        )?;
                    }
                }
            }
        }
        Ok(())
    }
}
