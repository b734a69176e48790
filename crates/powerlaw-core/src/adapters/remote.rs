use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::adapters::csv_codec::decode_price_csv;
use crate::data_source::{SeriesSource, SourceError, SourceKind};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient, DEFAULT_TIMEOUT_MS};
use crate::{AnalysisConfig, ColumnLayout, RawSeries};

/// CSV export fetched over HTTP.
#[derive(Clone)]
pub struct RemoteCsvSource {
    url: String,
    layout: ColumnLayout,
    timeout_ms: u64,
    http_client: Arc<dyn HttpClient>,
}

impl RemoteCsvSource {
    pub fn new(url: impl Into<String>, layout: ColumnLayout) -> Self {
        Self {
            url: url.into(),
            layout,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            http_client: Arc::new(ReqwestHttpClient::default()),
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.source_url.clone(), config.layout).with_timeout_ms(config.timeout_ms)
    }

    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient>) -> Self {
        self.http_client = http_client;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    async fn fetch_series(&self) -> Result<RawSeries, SourceError> {
        tracing::info!(url = %self.url, timeout_ms = self.timeout_ms, "fetching price series");

        let request = HttpRequest::get(self.url.clone())
            .with_header("accept", "text/csv")
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|e| {
            SourceError::unavailable(format!("{}: {}", self.url, e.message()))
        })?;

        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "{}: upstream returned status {}",
                self.url, response.status
            )));
        }

        let series = decode_price_csv(&self.url, &response.body, self.layout)?;
        tracing::debug!(rows = series.len(), "decoded remote price series");
        Ok(series)
    }
}

impl SeriesSource for RemoteCsvSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Remote
    }

    fn location(&self) -> String {
        self.url.clone()
    }

    fn fetch<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<RawSeries, SourceError>> + Send + 'a>> {
        Box::pin(self.fetch_series())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::SourceErrorKind;
    use crate::http_client::{HttpError, HttpResponse, StaticHttpClient};

    const LAYOUT: ColumnLayout = ColumnLayout::new(0, 1, 2);

    #[tokio::test]
    async fn forwards_timeout_and_decodes_body() {
        let client = Arc::new(StaticHttpClient::respond(HttpResponse::ok(
            "Time,a,b\n2009-01-04,1,\n2009-01-05,2,\n",
        )));
        let source = RemoteCsvSource::new("https://example.test/export.csv", LAYOUT)
            .with_timeout_ms(1_500)
            .with_http_client(client.clone());

        let series = source.fetch().await.expect("canned payload decodes");

        assert_eq!(series.len(), 2);
        assert_eq!(series.origin, "https://example.test/export.csv");
        let sent = client.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].timeout_ms, 1_500);
        assert_eq!(sent[0].headers.get("accept").map(String::as_str), Some("text/csv"));
    }

    #[tokio::test]
    async fn non_success_status_is_unavailable() {
        let client = Arc::new(StaticHttpClient::respond(HttpResponse {
            status: 503,
            body: String::from("maintenance"),
        }));
        let source =
            RemoteCsvSource::new("https://example.test/export.csv", LAYOUT).with_http_client(client);

        let error = source.fetch().await.expect_err("503 must fail");
        assert_eq!(error.kind(), SourceErrorKind::Unavailable);
        assert!(error.message().contains("503"));
    }

    #[tokio::test]
    async fn transport_failure_is_unavailable() {
        let client = Arc::new(StaticHttpClient::fail(HttpError::new("connection refused")));
        let source =
            RemoteCsvSource::new("https://example.test/export.csv", LAYOUT).with_http_client(client);

        let error = source.fetch().await.expect_err("transport error must fail");
        assert_eq!(error.kind(), SourceErrorKind::Unavailable);
        assert!(error.message().contains("connection refused"));
    }

    #[test]
    fn from_config_uses_configured_url() {
        let config = AnalysisConfig::default();
        let source = RemoteCsvSource::from_config(&config);
        assert_eq!(source.location(), config.source_url);
        assert_eq!(source.kind(), SourceKind::Remote);
    }
}
