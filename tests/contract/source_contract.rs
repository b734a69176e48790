//! Contract shared by every `SeriesSource`: the same export yields the same
//! raw rows, and failures surface as classified `SourceError`s.

use std::sync::Arc;

use powerlaw_core::{
    ColumnLayout, CsvFileSource, FixtureSource, HttpError, HttpResponse, RawSeries,
    RemoteCsvSource, SeriesSource, SourceErrorKind, SourceKind, StaticHttpClient,
};

const LAYOUT: ColumnLayout = ColumnLayout::new(0, 9, 3);

const EXPORT: &str = "\
Time,c1,c2,price b,c4,c5,c6,c7,c8,price a
2010-07-17 00:00:00 UTC,,,0.0495,,,,,,
2010-07-18 00:00:00 UTC,,,0.0858,,,,,,0.0860
2010-07-19 00:00:00 UTC,,,NaN,,,,,,0.0808
";

struct SourceCase {
    kind: SourceKind,
    source: Arc<dyn SeriesSource>,
    // Keeps the exported file alive for the file-backed case.
    _dir: Option<tempfile::TempDir>,
}

fn source_cases(payload: &str) -> Vec<SourceCase> {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("export.csv");
    std::fs::write(&path, payload).expect("export written");

    let http = Arc::new(StaticHttpClient::respond(HttpResponse::ok(payload)));

    vec![
        SourceCase {
            kind: SourceKind::Remote,
            source: Arc::new(
                RemoteCsvSource::new("https://example.test/export.csv", LAYOUT)
                    .with_http_client(http),
            ),
            _dir: None,
        },
        SourceCase {
            kind: SourceKind::File,
            source: Arc::new(CsvFileSource::new(path, LAYOUT)),
            _dir: Some(dir),
        },
        SourceCase {
            kind: SourceKind::Fixture,
            source: Arc::new(FixtureSource::from_csv("fixture", payload, LAYOUT)),
            _dir: None,
        },
    ]
}

#[tokio::test]
async fn every_source_decodes_the_same_rows() {
    let mut decoded: Vec<RawSeries> = Vec::new();

    for case in source_cases(EXPORT) {
        assert_eq!(case.source.kind(), case.kind);
        assert!(!case.source.location().is_empty());

        let series = case
            .source
            .fetch()
            .await
            .unwrap_or_else(|e| panic!("{} source failed: {e}", case.kind));
        assert_eq!(series.len(), 3, "{} source row count", case.kind);
        decoded.push(series);
    }

    for series in &decoded[1..] {
        assert_eq!(series.rows, decoded[0].rows);
    }
}

#[tokio::test]
async fn every_source_keeps_missing_cells_as_gaps() {
    for case in source_cases(EXPORT) {
        let series = case.source.fetch().await.expect("valid export");

        assert_eq!(series.rows[0].column_a, None);
        assert_eq!(series.rows[0].column_b, Some(0.0495));
        assert_eq!(series.rows[2].column_a, Some(0.0808));
        assert_eq!(series.rows[2].column_b, None, "NaN is a gap for {}", case.kind);
    }
}

#[tokio::test]
async fn every_source_rejects_a_narrow_header() {
    let narrow = "Time,price\n2010-07-17 00:00:00 UTC,0.05\n";

    for case in source_cases(narrow) {
        let error = case
            .source
            .fetch()
            .await
            .expect_err("layout needs ten columns");
        assert_eq!(error.kind(), SourceErrorKind::SchemaMismatch, "{}", case.kind);
        assert_eq!(error.code(), "source.schema_mismatch");
    }
}

#[tokio::test]
async fn every_source_rejects_a_bad_timestamp() {
    let broken = EXPORT.replace("2010-07-18 00:00:00 UTC", "yesterday");

    for case in source_cases(&broken) {
        let error = case.source.fetch().await.expect_err("timestamp must parse");
        assert_eq!(error.kind(), SourceErrorKind::Malformed, "{}", case.kind);
    }
}

#[tokio::test]
async fn unreachable_sources_report_unavailable() {
    let refused = RemoteCsvSource::new("https://example.test/export.csv", LAYOUT)
        .with_http_client(Arc::new(StaticHttpClient::fail(HttpError::new(
            "connection refused",
        ))));
    let server_error = RemoteCsvSource::new("https://example.test/export.csv", LAYOUT)
        .with_http_client(Arc::new(StaticHttpClient::respond(HttpResponse {
            status: 503,
            body: String::new(),
        })));
    let missing_file = CsvFileSource::new("/nonexistent/powerlaw/export.csv", LAYOUT);

    let sources: [&dyn SeriesSource; 3] = [&refused, &server_error, &missing_file];
    for source in sources {
        let error = source.fetch().await.expect_err("source is unreachable");
        assert_eq!(error.kind(), SourceErrorKind::Unavailable, "{}", source.kind());
        assert_eq!(error.code(), "source.unavailable");
    }
}
