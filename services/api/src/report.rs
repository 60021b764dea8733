use crate::infra::build_engine;
use clap::Args;
use intro_rubric::batch::TranscriptBatch;
use intro_rubric::config::{AppConfig, ScoringConfig};
use intro_rubric::error::AppError;
use intro_rubric::validation::{positive_or_default, ValidationError};
use intro_rubric::{RubricCatalog, ScoreResult, MAX_SCORE};
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Read;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Speaking time in seconds (non-positive or missing uses the configured default)
    #[arg(long)]
    pub(crate) duration: Option<f64>,
    /// Transcript file to score; reads stdin when omitted
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
    /// Emit the JSON result instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with `transcript` and `duration_sec` columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Emit one JSON document with every result
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct BatchRow {
    row: usize,
    #[serde(flatten)]
    result: ScoreResult,
}

fn scoring_config() -> Result<ScoringConfig, AppError> {
    Ok(AppConfig::load()?.scoring)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|err| AppError::Internal(err.to_string()))
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        duration,
        file,
        json,
    } = args;

    let scoring = scoring_config()?;
    let transcript = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let transcript = transcript.trim_end_matches(['\r', '\n']);
    if transcript.is_empty() {
        return Err(ValidationError::MissingTranscript.into());
    }

    let duration_sec = positive_or_default(duration.unwrap_or(0.0), scoring.default_duration_sec);
    let engine = build_engine(&scoring)?;
    let result = engine.score(transcript, duration_sec);

    if json {
        println!("{}", to_json(&result)?);
    } else {
        print!("{}", render_score_report(&result));
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let scoring = scoring_config()?;
    let entries = TranscriptBatch::from_path(&args.csv, scoring.default_duration_sec)?;
    let engine = build_engine(&scoring)?;

    let rows: Vec<BatchRow> = entries
        .into_iter()
        .map(|entry| BatchRow {
            row: entry.row,
            result: engine.score(&entry.transcript, entry.duration_sec),
        })
        .collect();

    if args.json {
        println!("{}", to_json(&rows)?);
    } else {
        let results: Vec<(usize, &ScoreResult)> =
            rows.iter().map(|row| (row.row, &row.result)).collect();
        print!("{}", render_batch_summary(&results));
    }

    Ok(())
}

pub(crate) fn run_rubric() -> Result<(), AppError> {
    let catalog = RubricCatalog::standard()?;
    println!("Rubric ({} pts)", catalog.total_weight());
    print!("{catalog}");
    Ok(())
}

pub(crate) fn render_score_report(result: &ScoreResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Final score: {}/{} ({})",
        result.final_score,
        MAX_SCORE,
        result.tier.label()
    );
    let _ = writeln!(
        out,
        "Words: {} | Duration: {}s",
        result.total_word_count, result.total_duration_sec
    );

    for category in result.detailed_feedback.categories() {
        let _ = writeln!(
            out,
            "\n{}: {}/{}",
            category.name,
            category.total_score,
            category.max_points()
        );
        for metric in &category.metrics {
            let _ = writeln!(
                out,
                "- {}: {}/{} (value {}) {}",
                metric.name, metric.score, metric.weight, metric.value, metric.feedback
            );
        }
    }

    let _ = writeln!(out, "\n{}", result.overall_feedback);
    out
}

pub(crate) fn render_batch_summary(results: &[(usize, &ScoreResult)]) -> String {
    let mut out = String::new();
    if results.is_empty() {
        let _ = writeln!(out, "No transcripts found");
        return out;
    }

    for (row, result) in results {
        let _ = writeln!(
            out,
            "row {}: {}/{} ({}), {} words over {}s",
            row,
            result.final_score,
            MAX_SCORE,
            result.tier.label(),
            result.total_word_count,
            result.total_duration_sec
        );
    }

    let mean = results
        .iter()
        .map(|(_, result)| f64::from(result.final_score))
        .sum::<f64>()
        / results.len() as f64;
    let _ = writeln!(out, "\nMean score: {mean:.1} across {} transcripts", results.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use intro_rubric::ScoringEngine;

    fn engine() -> ScoringEngine {
        build_engine(&ScoringConfig::default()).expect("engine builds")
    }

    #[test]
    fn score_report_lists_every_category() {
        let result = engine().score(
            "Hello everyone, my name is Alice. Thank you for listening.",
            30.0,
        );

        let report = render_score_report(&result);

        assert!(report.starts_with("Final score: 65/100 (Solid effort)"));
        assert!(report.contains("Content & Structure: 13/40"));
        assert!(report.contains("- Salutation Level: 5/5 (value 1) Clear salutation present."));
        assert!(report.contains("Clarity: 30/30"));
        assert!(report.trim_end().ends_with(&result.overall_feedback));
    }

    #[test]
    fn batch_summary_reports_mean() {
        let engine = engine();
        let strong = engine.score("Hello everyone, my name is Alice. Thank you for listening.", 30.0);
        let empty = engine.score("", 60.0);

        let summary = render_batch_summary(&[(1, &strong), (2, &empty)]);

        assert!(summary.contains("row 1: 65/100 (Solid effort)"));
        assert!(summary.contains("row 2: 19/100 (Needs improvement), 0 words over 60s"));
        assert!(summary.contains("Mean score: 42.0 across 2 transcripts"));
    }

    #[test]
    fn batch_rows_flatten_result_fields() {
        let row = BatchRow {
            row: 3,
            result: engine().score("Good morning", 10.0),
        };
        let value = serde_json::to_value(&row).expect("serializes");
        assert_eq!(value["row"], 3);
        assert_eq!(value["total_duration_sec"], 10.0);
        assert!(value["detailed_feedback"].is_object());
    }
}
