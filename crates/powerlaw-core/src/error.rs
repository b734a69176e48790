use thiserror::Error;

use crate::data_source::SourceError;

/// Validation errors for configuration and domain values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("timestamp is not a recognised date or date-time: '{value}'")]
    InvalidTimestamp { value: String },

    #[error("date must be formatted YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be greater than zero, got {value}")]
    NonPositiveValue { field: &'static str, value: f64 },

    #[error("days from epoch must be greater than zero, got {value}")]
    NonPositiveDays { value: i64 },

    #[error("projection_years must be at most {max}, got {value}")]
    ProjectionYearsTooLarge { value: i64, max: i64 },
    #[error("timeout_ms must be greater than zero")]
    ZeroTimeout,
    #[error("source url cannot be empty")]
    EmptySourceUrl,
    #[error("column positions must be distinct from the timestamp column ({timestamp})")]
    OverlappingColumns { timestamp: usize },
}

/// Pipeline error taxonomy surfaced by `analyze` and each of its stages.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),

    #[error("series is empty after reconciliation ({total_rows} raw rows)")]
    EmptySeries { total_rows: usize },

    #[error("{field} must be greater than zero for a logarithm, got {value}")]
    InvalidDomain { field: &'static str, value: f64 },

    #[error("regression needs at least {required} distinct day values, got {distinct}")]
    InsufficientData { required: usize, distinct: usize },

    #[error("projection range [{start}, {stop}] is empty")]
    InvalidProjectionRange { start: i64, stop: i64 },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AnalysisError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::SourceUnavailable(_) => "analysis.source_unavailable",
            Self::EmptySeries { .. } => "analysis.empty_series",
            Self::InvalidDomain { .. } => "analysis.invalid_domain",
            Self::InsufficientData { .. } => "analysis.insufficient_data",
            Self::InvalidProjectionRange { .. } => "analysis.invalid_projection_range",
            Self::Validation(_) => "analysis.invalid_config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_errors_convert_into_source_unavailable() {
        let error: AnalysisError = SourceError::unavailable("connection refused").into();
        assert_eq!(error.code(), "analysis.source_unavailable");
        assert!(error.to_string().contains("connection refused"));
    }

    #[test]
    fn projection_range_message_names_bounds() {
        let error = AnalysisError::InvalidProjectionRange { start: 10, stop: 10 };
        assert_eq!(error.to_string(), "projection range [10, 10] is empty");
    }
}
