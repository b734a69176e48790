use std::future::Future;
use std::pin::Pin;

use crate::adapters::csv_codec::decode_price_csv;
use crate::data_source::{SeriesSource, SourceError, SourceKind};
use crate::{ColumnLayout, RawObservation, RawSeries};

/// In-memory source for offline runs and tests.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    label: String,
    outcome: Result<RawSeries, SourceError>,
}

impl FixtureSource {
    pub fn from_rows(label: impl Into<String>, rows: Vec<RawObservation>) -> Self {
        let label = label.into();
        Self {
            outcome: Ok(RawSeries::new(label.clone(), rows)),
            label,
        }
    }

    /// Decodes `payload` eagerly; a decode error is replayed on every fetch.
    pub fn from_csv(label: impl Into<String>, payload: &str, layout: ColumnLayout) -> Self {
        let label = label.into();
        Self {
            outcome: decode_price_csv(&label, payload, layout),
            label,
        }
    }

    /// A source whose every fetch fails with `error`.
    pub fn failing(label: impl Into<String>, error: SourceError) -> Self {
        Self {
            label: label.into(),
            outcome: Err(error),
        }
    }
}

impl SeriesSource for FixtureSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Fixture
    }

    fn location(&self) -> String {
        self.label.clone()
    }

    fn fetch<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<RawSeries, SourceError>> + Send + 'a>> {
        let outcome = self.outcome.clone();
        Box::pin(async move { outcome })
    }
}
