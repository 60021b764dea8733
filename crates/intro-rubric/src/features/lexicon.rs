//! Fixed phrase tables consulted by the feature extractor.

/// Filler tokens counted as whole words or phrases, case-insensitively.
pub const FILLER_WORDS: [&str; 15] = [
    "um", "uh", "like", "you know", "so", "actually", "basically", "right", "i mean", "well",
    "kinda", "sort of", "okay", "hmm", "ah",
];

/// A content dimension a complete self-introduction is expected to cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentDimension {
    pub keyword: &'static str,
    pub phrases: &'static [&'static str],
}

pub const CONTENT_DIMENSIONS: [ContentDimension; 8] = [
    ContentDimension {
        keyword: "name",
        phrases: &["i am", "myself", "my name"],
    },
    ContentDimension {
        keyword: "age",
        phrases: &["i am", "years old"],
    },
    ContentDimension {
        keyword: "class",
        phrases: &["class", "grade"],
    },
    ContentDimension {
        keyword: "school",
        phrases: &["school", "university", "college"],
    },
    ContentDimension {
        keyword: "family",
        phrases: &["family", "parents", "mother", "father", "siblings"],
    },
    ContentDimension {
        keyword: "hobbies",
        phrases: &["enjoy", "like to", "hobbies", "interests", "play"],
    },
    ContentDimension {
        keyword: "goals",
        phrases: &["want to be", "my goal", "aspire to", "future"],
    },
    ContentDimension {
        keyword: "unique point",
        phrases: &["special thing", "fun fact", "one thing people don't know"],
    },
];

pub const GREETINGS: [&str; 4] = ["hello", "good morning", "good day", "greetings"];

pub const CLOSINGS: [&str; 3] = ["thank you", "that is all", "i'm done"];

/// Closing phrases only count when they appear within this many trailing characters.
pub const CLOSING_WINDOW_CHARS: usize = 50;

pub fn content_keywords() -> Vec<&'static str> {
    CONTENT_DIMENSIONS
        .iter()
        .map(|dimension| dimension.keyword)
        .collect()
}
