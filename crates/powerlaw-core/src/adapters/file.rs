use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::adapters::csv_codec::decode_price_csv;
use crate::data_source::{SeriesSource, SourceError, SourceKind};
use crate::{ColumnLayout, RawSeries};

/// CSV export previously saved to local disk.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
    layout: ColumnLayout,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>, layout: ColumnLayout) -> Self {
        Self {
            path: path.into(),
            layout,
        }
    }

    async fn read_series(&self) -> Result<RawSeries, SourceError> {
        let origin = self.path.display().to_string();
        tracing::info!(path = %origin, "reading price series from file");

        let payload = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::unavailable(format!("{origin}: {e}")))?;

        decode_price_csv(&origin, &payload, self.layout)
    }
}

impl SeriesSource for CsvFileSource {
    fn kind(&self) -> SourceKind {
        SourceKind::File
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<RawSeries, SourceError>> + Send + 'a>> {
        Box::pin(self.read_series())
    }
}
