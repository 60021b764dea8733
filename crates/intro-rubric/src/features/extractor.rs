use super::grammar::{grammar_score_raw, FixedErrorRate, GrammarEstimator};
use super::lexicon::{
    CLOSINGS, CLOSING_WINDOW_CHARS, CONTENT_DIMENSIONS, FILLER_WORDS, GREETINGS,
};
use super::tokenizer::{tokenize_with_fallback, Tokenizer, TreebankTokenizer, WordBoundaryTokenizer};
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

/// Whether one content dimension was mentioned in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeywordHit {
    pub keyword: &'static str,
    pub found: bool,
}

/// Raw metrics derived from a single transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedFeatures {
    pub word_count: usize,
    pub duration_sec: f64,
    pub words_per_minute: f64,
    pub type_token_ratio: f64,
    pub filler_count: usize,
    pub filler_rate_percent: f64,
    pub keywords_found: usize,
    pub keyword_hits: Vec<KeywordHit>,
    pub has_salutation: bool,
    pub has_closing: bool,
    pub has_flow: bool,
    pub grammar_errors_per_100_words: f64,
    pub grammar_score_raw: f64,
}

impl ExtractedFeatures {
    pub fn missing_keywords(&self) -> Vec<&'static str> {
        self.keyword_hits
            .iter()
            .filter(|hit| !hit.found)
            .map(|hit| hit.keyword)
            .collect()
    }

    pub fn keyword_total(&self) -> usize {
        self.keyword_hits.len()
    }
}

pub fn words_per_minute(word_count: usize, duration_sec: f64) -> f64 {
    if duration_sec > 0.0 {
        (word_count as f64 / duration_sec) * 60.0
    } else {
        0.0
    }
}

pub fn type_token_ratio(words: &[String]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let distinct: HashSet<&str> = words.iter().map(String::as_str).collect();
    distinct.len() as f64 / words.len() as f64
}

/// Empty transcripts report the worst possible rate.
pub fn filler_rate_percent(filler_count: usize, word_count: usize) -> f64 {
    if word_count > 0 {
        (filler_count as f64 / word_count as f64) * 100.0
    } else {
        100.0
    }
}

/// Turns a transcript and its duration into [`ExtractedFeatures`].
pub struct FeatureExtractor<G = FixedErrorRate> {
    primary: Box<dyn Tokenizer>,
    fallback: WordBoundaryTokenizer,
    fillers: Vec<Regex>,
    grammar: G,
}

impl FeatureExtractor<FixedErrorRate> {
    pub fn standard() -> Result<Self, regex::Error> {
        Self::new(FixedErrorRate::default())
    }
}

impl<G: GrammarEstimator> FeatureExtractor<G> {
    pub fn new(grammar: G) -> Result<Self, regex::Error> {
        let fillers = FILLER_WORDS
            .iter()
            .map(|filler| Regex::new(&format!(r"\b{}\b", regex::escape(filler))))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            primary: Box::new(TreebankTokenizer),
            fallback: WordBoundaryTokenizer::new()?,
            fillers,
            grammar,
        })
    }

    pub fn with_tokenizer<T: Tokenizer + 'static>(mut self, tokenizer: T) -> Self {
        self.primary = Box::new(tokenizer);
        self
    }

    pub fn grammar(&self) -> &G {
        &self.grammar
    }

    pub fn extract(&self, transcript: &str, duration_sec: f64) -> ExtractedFeatures {
        let words = tokenize_with_fallback(self.primary.as_ref(), &self.fallback, transcript);
        let word_count = words.len();
        let lowered = transcript.to_lowercase();

        let filler_count = self.count_fillers(&lowered);
        let keyword_hits = keyword_hits(&lowered);
        let keywords_found = keyword_hits.iter().filter(|hit| hit.found).count();
        let has_salutation = has_salutation(&lowered);
        let has_closing = has_closing(&lowered);
        let grammar_errors_per_100_words = self.grammar.errors_per_100_words(transcript, &words);

        ExtractedFeatures {
            word_count,
            duration_sec,
            words_per_minute: words_per_minute(word_count, duration_sec),
            type_token_ratio: type_token_ratio(&words),
            filler_count,
            filler_rate_percent: filler_rate_percent(filler_count, word_count),
            keywords_found,
            keyword_hits,
            has_salutation,
            has_closing,
            has_flow: has_salutation && has_closing,
            grammar_errors_per_100_words,
            grammar_score_raw: grammar_score_raw(grammar_errors_per_100_words),
        }
    }

    fn count_fillers(&self, lowered: &str) -> usize {
        self.fillers
            .iter()
            .map(|pattern| pattern.find_iter(lowered).count())
            .sum()
    }
}

fn keyword_hits(lowered: &str) -> Vec<KeywordHit> {
    CONTENT_DIMENSIONS
        .iter()
        .map(|dimension| KeywordHit {
            keyword: dimension.keyword,
            found: dimension
                .phrases
                .iter()
                .any(|phrase| lowered.contains(phrase)),
        })
        .collect()
}

fn has_salutation(lowered: &str) -> bool {
    let opening = lowered.trim_start();
    GREETINGS.iter().any(|greeting| opening.starts_with(greeting))
}

fn has_closing(lowered: &str) -> bool {
    let char_count = lowered.chars().count();
    let window_start = lowered
        .char_indices()
        .nth(char_count.saturating_sub(CLOSING_WINDOW_CHARS))
        .map(|(index, _)| index)
        .unwrap_or(lowered.len());
    let tail = &lowered[window_start..];
    CLOSINGS.iter().any(|closing| tail.contains(closing))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> FeatureExtractor {
        FeatureExtractor::standard().expect("filler patterns compile")
    }

    #[test]
    fn empty_transcript_yields_degenerate_metrics() {
        let features = extractor().extract("", 30.0);

        assert_eq!(features.word_count, 0);
        assert_eq!(features.words_per_minute, 0.0);
        assert_eq!(features.type_token_ratio, 0.0);
        assert_eq!(features.filler_rate_percent, 100.0);
        assert_eq!(features.keywords_found, 0);
        assert!(!features.has_flow);
    }

    #[test]
    fn words_per_minute_scales_by_duration() {
        assert_eq!(words_per_minute(100, 60.0), 100.0);
        assert_eq!(words_per_minute(50, 20.0), 150.0);
        assert_eq!(words_per_minute(50, 0.0), 0.0);
    }

    #[test]
    fn counts_every_filler_in_the_list() {
        let features = extractor().extract("Um, I like, you know, basically like coding. Umbrella.", 60.0);

        // um, like x2, you know, basically; "umbrella" is not a whole-word match
        assert_eq!(features.filler_count, 5);
    }

    #[test]
    fn salutation_ignores_leading_whitespace() {
        let features = extractor().extract("   Good morning class", 10.0);
        assert!(features.has_salutation);
        assert!(!features.has_closing);
        assert!(!features.has_flow);
    }

    #[test]
    fn closing_must_sit_near_the_end() {
        let long_tail = "x".repeat(60);
        let early = format!("Hello, thank you all {long_tail}");
        let late = format!("Hello {long_tail} that is all");

        assert!(!extractor().extract(&early, 10.0).has_closing);
        let features = extractor().extract(&late, 10.0);
        assert!(features.has_closing);
        assert!(features.has_flow);
    }

    #[test]
    fn keyword_coverage_records_missing_dimensions() {
        let features = extractor().extract(
            "My name is Ravi. I study in grade 7 at Sunrise School and I enjoy chess.",
            20.0,
        );

        assert_eq!(features.keywords_found, 4);
        assert_eq!(
            features.missing_keywords(),
            vec!["age", "family", "goals", "unique point"]
        );
    }

    #[test]
    fn type_token_ratio_is_case_sensitive_over_tokens() {
        let words: Vec<String> = ["The", "cat", "the", "cat"]
            .iter()
            .map(|word| word.to_string())
            .collect();
        assert_eq!(type_token_ratio(&words), 0.75);
    }
}
