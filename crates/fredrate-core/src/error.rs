use thiserror::Error;

/// Validation and contract errors exposed by `fredrate-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("series id cannot be empty")]
    EmptySeriesId,
    #[error("series id length {len} exceeds max {max}")]
    SeriesIdTooLong { len: usize, max: usize },
    #[error("series id contains invalid character '{ch}' at index {index}")]
    SeriesIdInvalidChar { ch: char, index: usize },

    #[error("date must be YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("observation start {start} is after observation end {end}")]
    InvertedDateRange { start: String, end: String },

    #[error("moving average window must be greater than zero")]
    ZeroWindow,
}
