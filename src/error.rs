use thiserror::Error;

/// Failures of split-point selection. Everything else about the input is tolerated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    #[error("invalid split configuration: {0}")]
    InvalidConfiguration(String),
}

impl SplitError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SplitError::InvalidConfiguration(message.into())
    }
}

/// Errors surfaced while reading SRT subtitle text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubtitleError {
    #[error("line {line}: expected a timing line, found '{found}'")]
    MissingTiming { line: usize, found: String },
    #[error("line {line}: invalid timestamp '{value}'")]
    InvalidTimestamp { line: usize, value: String },
    #[error("line {line}: cue ends ({end:.3}s) before it starts ({start:.3}s)")]
    NegativeDuration { line: usize, start: f64, end: f64 },
}
