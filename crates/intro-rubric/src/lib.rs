//! Rubric engine for scoring spoken self-introduction transcripts.
//!
//! The engine turns a transcript and its duration into extracted features, runs those features
//! through the declarative [`rubric::RubricCatalog`], and rolls the per-metric scores into a
//! [`scoring::ScoreResult`] with category totals and an overall feedback tier.

pub mod batch;
pub mod config;
pub mod error;
pub mod features;
pub mod rubric;
pub mod scoring;
pub mod telemetry;
pub mod validation;

pub use features::{ExtractedFeatures, FeatureExtractor};
pub use rubric::{RubricCatalog, MAX_SCORE};
pub use scoring::{OverallTier, ScoreResult, ScoringEngine};
