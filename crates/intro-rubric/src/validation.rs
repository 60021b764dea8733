//! Boundary checks applied to scoring requests before the engine runs.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Transcript text is required.")]
    MissingTranscript,
    #[error("Duration must be a valid number in seconds.")]
    InvalidDuration,
    #[error("Request body must be a JSON object: {0}")]
    MalformedBody(String),
}

/// A request that passed validation; the duration is always positive.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRequest {
    pub transcript: String,
    pub duration_sec: f64,
}

impl ScoreRequest {
    /// Validates a `{transcript, duration_sec}` payload.
    pub fn from_payload(payload: &Value, default_duration_sec: f64) -> Result<Self, ValidationError> {
        let Some(fields) = payload.as_object() else {
            return Err(ValidationError::MalformedBody(
                "expected an object with a transcript field".to_string(),
            ));
        };

        let transcript = match fields.get("transcript") {
            Some(Value::String(text)) if !text.is_empty() => text.clone(),
            _ => return Err(ValidationError::MissingTranscript),
        };

        let duration_sec = coerce_duration(fields.get("duration_sec"), default_duration_sec)?;

        Ok(Self {
            transcript,
            duration_sec,
        })
    }
}

/// Coerces a JSON number or numeric string to seconds.
///
/// Absent or null durations count as zero; zero, negative and non-finite values become
/// `default_duration_sec`.
pub fn coerce_duration(raw: Option<&Value>, default_duration_sec: f64) -> Result<f64, ValidationError> {
    let seconds = match raw {
        None | Some(Value::Null) => 0.0,
        Some(Value::Number(number)) => number.as_f64().ok_or(ValidationError::InvalidDuration)?,
        Some(Value::String(text)) => parse_seconds(text)?,
        Some(_) => return Err(ValidationError::InvalidDuration),
    };

    Ok(positive_or_default(seconds, default_duration_sec))
}

pub fn parse_seconds(text: &str) -> Result<f64, ValidationError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidDuration)
}

pub fn positive_or_default(seconds: f64, default_duration_sec: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        default_duration_sec
    }
}
