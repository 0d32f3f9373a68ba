use std::time::Duration;

/// A single timed lyric line.
///
/// Sequences of lines are ordered by non-decreasing start time; transforms
/// over a sequence must preserve its length and ordering and may only
/// change the text of each line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricLine {
    pub start_time: Duration,
    pub text: String,
}

impl LyricLine {
    /// Create a new lyric line
    pub fn new(start_time: Duration, text: impl Into<String>) -> Self {
        Self {
            start_time,
            text: text.into(),
        }
    }

    /// Create a lyric line from a millisecond start offset
    pub fn from_millis(start_ms: u64, text: impl Into<String>) -> Self {
        Self::new(Duration::from_millis(start_ms), text)
    }
}

/// Concatenate line texts with newline separators.
///
/// Batching translation adapters send the whole sequence as one query and
/// split the result back by positional index.
#[must_use]
pub fn join_texts(lines: &[LyricLine]) -> String {
    lines
        .iter()
        .map(|line| line.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check that a sequence is ordered by non-decreasing start time
#[must_use]
pub fn is_time_ordered(lines: &[LyricLine]) -> bool {
    lines
        .windows(2)
        .all(|pair| pair[0].start_time <= pair[1].start_time)
}
