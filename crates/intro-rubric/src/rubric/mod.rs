//! Declarative rubric model and the ordered bucket matcher.

mod catalog;
mod matcher;
pub mod standard;

pub use catalog::{
    Bucket, BucketRule, Category, Metric, MetricKey, Polarity, RangePredicate, RangeUnit,
    RubricCatalog, RubricError, ScoringRule, MAX_SCORE,
};
pub use matcher::{match_bucket, BucketMatch};
