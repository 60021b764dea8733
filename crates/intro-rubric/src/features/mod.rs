//! Transcript feature extraction feeding the rubric engine.

mod extractor;
pub mod grammar;
pub mod lexicon;
pub mod tokenizer;

pub use extractor::{
    filler_rate_percent, type_token_ratio, words_per_minute, ExtractedFeatures,
    FeatureExtractor, KeywordHit,
};
pub use grammar::{FixedErrorRate, GrammarEstimator};
pub use tokenizer::{TokenizeError, Tokenizer, TreebankTokenizer, WordBoundaryTokenizer};
