//! CSV import of transcripts for offline batch scoring.

use crate::validation::{parse_seconds, positive_or_default, ValidationError};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum BatchError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { row: usize, source: ValidationError },
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchError::Io(err) => write!(f, "failed to read transcript batch: {}", err),
            BatchError::Csv(err) => write!(f, "invalid transcript CSV data: {}", err),
            BatchError::Row { row, source } => write!(f, "row {}: {}", row, source),
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchError::Io(err) => Some(err),
            BatchError::Csv(err) => Some(err),
            BatchError::Row { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for BatchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BatchError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One transcript ready for scoring. `row` is 1-based, excluding the header.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub row: usize,
    pub transcript: String,
    pub duration_sec: f64,
}

#[derive(Debug, Deserialize)]
struct TranscriptRow {
    transcript: String,
    #[serde(default)]
    duration_sec: Option<String>,
}

pub struct TranscriptBatch;

impl TranscriptBatch {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        default_duration_sec: f64,
    ) -> Result<Vec<BatchEntry>, BatchError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, default_duration_sec)
    }

    /// Reads `transcript,duration_sec` rows; durations follow the same rules as the HTTP
    /// boundary.
    pub fn from_reader<R: Read>(
        reader: R,
        default_duration_sec: f64,
    ) -> Result<Vec<BatchEntry>, BatchError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        let mut entries = Vec::new();

        for (index, record) in csv_reader.deserialize::<TranscriptRow>().enumerate() {
            let row = index + 1;
            let TranscriptRow {
                transcript,
                duration_sec,
            } = record?;

            if transcript.is_empty() {
                return Err(BatchError::Row {
                    row,
                    source: ValidationError::MissingTranscript,
                });
            }

            let seconds = match duration_sec.as_deref().map(str::trim) {
                None | Some("") => 0.0,
                Some(raw) => {
                    parse_seconds(raw).map_err(|source| BatchError::Row { row, source })?
                }
            };

            entries.push(BatchEntry {
                row,
                transcript,
                duration_sec: positive_or_default(seconds, default_duration_sec),
            });
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_rows_and_defaults_blank_durations() {
        let data = "transcript,duration_sec\n\"Hello everyone, I am Mia.\",30\nGood morning all,\n";
        let entries = TranscriptBatch::from_reader(Cursor::new(data), 60.0).expect("batch parses");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].transcript, "Hello everyone, I am Mia.");
        assert_eq!(entries[0].duration_sec, 30.0);
        assert_eq!(entries[1].row, 2);
        assert_eq!(entries[1].duration_sec, 60.0);
    }

    #[test]
    fn reports_row_with_invalid_duration() {
        let data = "transcript,duration_sec\nHello,abc\n";
        let err = TranscriptBatch::from_reader(Cursor::new(data), 60.0).expect_err("invalid row");

        assert!(matches!(
            err,
            BatchError::Row {
                row: 1,
                source: ValidationError::InvalidDuration
            }
        ));
        assert_eq!(
            err.to_string(),
            "row 1: Duration must be a valid number in seconds."
        );
    }

    #[test]
    fn keeps_whitespace_only_transcripts_like_the_http_boundary() {
        let data = r#"transcript,duration_sec
"   ", 45 
"#;
        let entries = TranscriptBatch::from_reader(Cursor::new(data), 60.0).expect("batch parses");

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].transcript, "   ");
        assert_eq!(entries[0].duration_sec, 45.0);
    }

    #[test]
    fn rejects_row_with_empty_transcript() {
        let data = "transcript,duration_sec
,30
";
        let err = TranscriptBatch::from_reader(Cursor::new(data), 60.0).expect_err("empty row");

        assert!(matches!(
            err,
            BatchError::Row {
                row: 1,
                source: ValidationError::MissingTranscript
            }
        ));
    }
}
