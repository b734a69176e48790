//! Series source trait and loader errors.
//!
//! A [`SeriesSource`] hands the pipeline a [`RawSeries`]; it does not clean,
//! reconcile or fit anything. Swapping the source is how tests run the whole
//! pipeline offline.
//!
//! # Example
//!
//! ```rust,ignore
//! use powerlaw_core::{AnalysisConfig, RemoteCsvSource, SeriesSource};
//!
//! async fn row_count(config: &AnalysisConfig) -> Result<usize, powerlaw_core::SourceError> {
//!     let source = RemoteCsvSource::from_config(config);
//!     let raw = source.fetch().await?;
//!     Ok(raw.len())
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::Serialize;

use crate::RawSeries;

/// Kind of backing store a source reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Remote,
    File,
    Fixture,
}

impl SourceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::File => "file",
            Self::Fixture => "fixture",
        }
    }
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loader error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Transport failed, timed out, or returned a non-success status.
    Unavailable,
    /// Payload lacks the expected columns.
    SchemaMismatch,
    /// Payload has the right shape but a row could not be decoded.
    Malformed,
}

/// Structured loader error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::SchemaMismatch,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Malformed,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::SchemaMismatch => "source.schema_mismatch",
            SourceErrorKind::Malformed => "source.malformed",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Source of a raw price series.
///
/// Implementations must be `Send + Sync` so a boxed source can be held
/// across the fetch await point.
pub trait SeriesSource: Send + Sync {
    /// Backing store kind, used in logs and reports.
    fn kind(&self) -> SourceKind;

    /// URL, path or label identifying the data.
    fn location(&self) -> String;

    /// Retrieves the full raw series with timestamps parsed.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the data cannot be retrieved or does not
    /// have the expected columns. Loader errors never retry.
    fn fetch<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<RawSeries, SourceError>> + Send + 'a>>;
}
