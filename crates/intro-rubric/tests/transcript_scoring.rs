//! End-to-end scoring scenarios driven through the public engine facade.

use intro_rubric::features::{FeatureExtractor, GrammarEstimator};
use intro_rubric::rubric::standard::{
    CLARITY, CONTENT_AND_STRUCTURE, FILLER_WORD_RATE, FLOW, GRAMMAR_ERRORS, KEYWORD_PRESENCE,
    LANGUAGE_AND_GRAMMAR, SALUTATION_LEVEL, SPEECH_RATE, SPEECH_RATE_WPM, VOCABULARY_RICHNESS,
};
use intro_rubric::rubric::RubricCatalog;
use intro_rubric::scoring::MetricValue;
use intro_rubric::{OverallTier, ScoringEngine, MAX_SCORE};
use std::sync::Arc;
use std::thread;

const MODEL_INTRODUCTION: &str = "Hello everyone my name is Priya and I am twelve years old \
studying in grade seven at Green Valley School with loving parents who support our family while \
painting chess cricket are hobbies that fill weekends because someday in future becoming an \
engineer remains the dream plus one fun fact about me is collecting rare coins thank you";

fn engine() -> ScoringEngine {
    ScoringEngine::standard().expect("standard engine builds")
}

fn distinct_words(count: usize) -> Vec<String> {
    (0..count).map(|index| format!("word{index}")).collect()
}

#[test]
fn short_greeting_scenario_detects_salutation_flow_and_name() {
    let result = engine().score(
        "Hello everyone, my name is Alice. Thank you for listening.",
        30.0,
    );

    let salutation = result
        .metric(CONTENT_AND_STRUCTURE, SALUTATION_LEVEL)
        .expect("salutation scored");
    assert_eq!(salutation.value, MetricValue::Flag(1));
    assert_eq!(salutation.score, 5);

    let flow = result.metric(CONTENT_AND_STRUCTURE, FLOW).expect("flow scored");
    assert_eq!(flow.value, MetricValue::Flag(1));
    assert_eq!(flow.score, 5);

    let keywords = result
        .metric(CONTENT_AND_STRUCTURE, KEYWORD_PRESENCE)
        .expect("keywords scored");
    assert_eq!(keywords.value, MetricValue::Text("1/8".to_string()));
    assert_eq!(keywords.score, 3);
    assert_eq!(
        keywords.feedback,
        "Found 1 out of 8 key self-introduction details. (Missing: age, class, school, family, hobbies, goals, unique point)"
    );

    assert_eq!(result.total_word_count, 13);
    assert_eq!(result.final_score, 65);
    assert_eq!(result.tier, OverallTier::SolidEffort);
}

#[test]
fn one_hundred_words_per_minute_lands_in_slow_band() {
    let transcript = distinct_words(100).join(" ");
    let result = engine().score(&transcript, 60.0);

    let wpm = result
        .metric(SPEECH_RATE, SPEECH_RATE_WPM)
        .expect("speech rate scored");
    assert_eq!(wpm.value, MetricValue::Text("100.00".to_string()));
    assert_eq!(wpm.score, 6);
    assert_eq!(
        wpm.feedback,
        "A bit slow. Speed up slightly to keep listeners engaged."
    );
}

#[test]
fn filler_rate_of_exactly_one_percent_scores_twenty_five() {
    let mut words = distinct_words(99);
    words.push("um".to_string());
    let result = engine().score(&words.join(" "), 60.0);

    let filler = result
        .metric(CLARITY, FILLER_WORD_RATE)
        .expect("filler rate scored");
    assert_eq!(
        filler.value,
        MetricValue::Text("1.00% (1 filler words)".to_string())
    );
    assert_eq!(filler.score, 25);
}

#[test]
fn model_introduction_earns_full_marks() {
    let result = engine().score(MODEL_INTRODUCTION, 30.0);

    for category in result.detailed_feedback.categories() {
        assert_eq!(
            category.total_score,
            category.max_points(),
            "category {} lost points: {:?}",
            category.name,
            category.metrics
        );
    }
    assert_eq!(result.final_score, MAX_SCORE);
    assert_eq!(result.tier, OverallTier::Outstanding);
    assert!(result.overall_feedback.starts_with("Outstanding introduction!"));
}

#[test]
fn empty_transcript_produces_defined_result() {
    let result = engine().score("", 60.0);

    assert_eq!(result.total_word_count, 0);
    assert_eq!(
        result.metric(SPEECH_RATE, SPEECH_RATE_WPM).map(|m| m.score),
        Some(2)
    );
    assert_eq!(
        result
            .metric(LANGUAGE_AND_GRAMMAR, VOCABULARY_RICHNESS)
            .map(|m| m.value.to_string()),
        Some("0.00".to_string())
    );
    let filler = result
        .metric(CLARITY, FILLER_WORD_RATE)
        .expect("filler rate scored");
    assert_eq!(filler.value.to_string(), "100.00% (0 filler words)");
    assert_eq!(filler.score, 5);
    assert_eq!(
        result
            .metric(CONTENT_AND_STRUCTURE, KEYWORD_PRESENCE)
            .map(|m| m.score),
        Some(0)
    );
    assert_eq!(result.final_score, 19);
    assert_eq!(result.tier, OverallTier::NeedsImprovement);
}

#[test]
fn scoring_is_deterministic() {
    let engine = engine();
    let first = engine.score(MODEL_INTRODUCTION, 42.0);
    let second = engine.score(MODEL_INTRODUCTION, 42.0);
    assert_eq!(first, second);
}

#[test]
fn shared_engine_scores_consistently_across_threads() {
    let engine = Arc::new(engine());
    let expected = engine.score(MODEL_INTRODUCTION, 30.0);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || engine.score(MODEL_INTRODUCTION, 30.0))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("scoring thread completes"), expected);
    }
}

struct FixedErrors(f64);

impl GrammarEstimator for FixedErrors {
    fn errors_per_100_words(&self, _transcript: &str, _words: &[String]) -> f64 {
        self.0
    }
}

#[test]
fn injected_grammar_estimator_drives_grammar_bucket() {
    let catalog = Arc::new(RubricCatalog::standard().expect("standard rubric"));
    let engine = ScoringEngine::with_extractor(
        catalog,
        FeatureExtractor::new(FixedErrors(6.0)).expect("extractor builds"),
    );

    let result = engine.score(MODEL_INTRODUCTION, 30.0);
    let grammar = result
        .metric(LANGUAGE_AND_GRAMMAR, GRAMMAR_ERRORS)
        .expect("grammar scored");
    assert_eq!(grammar.value, MetricValue::Text("0.40".to_string()));
    assert_eq!(grammar.score, 4);
    assert_eq!(result.final_score, MAX_SCORE - 6);
}

#[test]
fn serialized_result_uses_boundary_field_names() {
    let result = engine().score(MODEL_INTRODUCTION, 30.0);
    let value = serde_json::to_value(&result).expect("result serializes");

    assert_eq!(value["final_score"], 100);
    assert_eq!(value["total_word_count"], 58);
    assert_eq!(value["total_duration_sec"], 30.0);
    assert_eq!(
        value["detailed_feedback"]["Content & Structure"]["Metrics"]["Salutation Level"]["Value"],
        1
    );
    assert_eq!(
        value["detailed_feedback"]["Clarity"]["Metrics"]["Filler Word Rate"]["Weightage"],
        30
    );

    let categories: Vec<&String> = value["detailed_feedback"]
        .as_object()
        .expect("categories object")
        .keys()
        .collect();
    assert_eq!(categories.len(), 4);
}
