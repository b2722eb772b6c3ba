//! Error types for trade data loading.

use thiserror::Error;

/// Result type alias using [`TradeError`].
pub type Result<T> = std::result::Result<T, TradeError>;

/// Failures raised by the data layer.
///
/// Unresolvable partner countries and empty selections are not errors: the
/// former are dropped during normalization, the latter are an empty result.
#[derive(Error, Debug)]
pub enum TradeError {
    /// The CSV could not be fetched or read.
    #[error("data source unavailable ({location}): {reason}")]
    SourceUnavailable { location: String, reason: String },

    /// A required column is absent from the CSV header.
    #[error("CSV is missing required column '{0}'")]
    MissingColumn(&'static str),

    /// The CSV header itself could not be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl TradeError {
    /// Create a source-unavailable error.
    pub fn source_unavailable(location: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        TradeError::SourceUnavailable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}
