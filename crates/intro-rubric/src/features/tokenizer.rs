use regex::Regex;
use thiserror::Error;
use tracing::debug;

const CONTRACTION_SUFFIXES: [&str; 6] = ["'s", "'m", "'re", "'ve", "'ll", "'d"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("transcript contains malformed text at byte {offset}")]
    MalformedText { offset: usize },
}

/// Splits a transcript into word tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError>;
}

/// English-aware tokenizer in the Penn Treebank manner: punctuation and contraction suffixes
/// become their own tokens and case is preserved.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreebankTokenizer;

impl Tokenizer for TreebankTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        if let Some((offset, _)) = text
            .char_indices()
            .find(|(_, c)| *c == char::REPLACEMENT_CHARACTER || (c.is_control() && !c.is_whitespace()))
        {
            return Err(TokenizeError::MalformedText { offset });
        }

        let mut tokens = Vec::new();
        for chunk in text.split_whitespace() {
            split_chunk(chunk, &mut tokens);
        }
        Ok(tokens)
    }
}

fn split_chunk(chunk: &str, tokens: &mut Vec<String>) {
    let core_start = chunk
        .find(|c: char| c.is_alphanumeric())
        .unwrap_or(chunk.len());
    push_punctuation(&chunk[..core_start], tokens);

    let rest = &chunk[core_start..];
    let core_end = rest
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_alphanumeric())
        .map(|(index, c)| index + c.len_utf8())
        .unwrap_or(0);
    if core_end == 0 {
        return;
    }

    push_word(&rest[..core_end], tokens);
    push_punctuation(&rest[core_end..], tokens);
}

fn push_word(word: &str, tokens: &mut Vec<String>) {
    let lowered = word.to_ascii_lowercase();

    if lowered.len() > 3 && lowered.ends_with("n't") {
        let split = word.len() - 3;
        tokens.push(word[..split].to_string());
        tokens.push(word[split..].to_string());
        return;
    }

    for suffix in CONTRACTION_SUFFIXES {
        if lowered.len() > suffix.len() && lowered.ends_with(suffix) {
            let split = word.len() - suffix.len();
            tokens.push(word[..split].to_string());
            tokens.push(word[split..].to_string());
            return;
        }
    }

    tokens.push(word.to_string());
}

// Runs of the same mark ("...", "!!") stay together.
fn push_punctuation(marks: &str, tokens: &mut Vec<String>) {
    let mut run = String::new();
    for mark in marks.chars() {
        if run.chars().last().is_some_and(|last| last != mark) {
            tokens.push(std::mem::take(&mut run));
        }
        run.push(mark);
    }
    if !run.is_empty() {
        tokens.push(run);
    }
}

/// Regex word-boundary split over lower-cased text. Never fails.
#[derive(Debug, Clone)]
pub struct WordBoundaryTokenizer {
    pattern: Regex,
}

impl WordBoundaryTokenizer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(r"\b\w+\b")?,
        })
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.pattern
            .find_iter(&lowered)
            .map(|found| found.as_str().to_string())
            .collect()
    }
}

impl Tokenizer for WordBoundaryTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        Ok(self.split(text))
    }
}

pub fn tokenize_with_fallback(
    primary: &dyn Tokenizer,
    fallback: &WordBoundaryTokenizer,
    text: &str,
) -> Vec<String> {
    match primary.tokenize(text) {
        Ok(tokens) => tokens,
        Err(err) => {
            debug!(error = %err, "primary tokenizer rejected transcript; using word-boundary split");
            fallback.split(text)
        }
    }
}
