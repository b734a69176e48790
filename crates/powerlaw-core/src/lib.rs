//! # Powerlaw Core
//!
//! Loading, reconciliation and power-law fitting for a single daily price
//! series.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Series sources (remote CSV, local file, in-memory fixture) |
//! | [`config`] | Analysis configuration and defaults |
//! | [`data_source`] | Source trait and loader errors |
//! | [`domain`] | Raw and reconciled observation types |
//! | [`error`] | Validation and pipeline errors |
//! | [`fit`] | Log-log least squares and trend projection |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`pipeline`] | Stage composition |
//! | [`reconcile`] | Column cutover merge and row cleaning |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use powerlaw_core::{analyze, AnalysisConfig, RemoteCsvSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AnalysisConfig::default();
//!     let source = RemoteCsvSource::from_config(&config);
//!     let analysis = analyze(&source, &config).await?;
//!
//!     println!(
//!         "slope {:.2}, intercept {:.2}, r^2 {:.2}",
//!         analysis.fit.slope, analysis.fit.intercept, analysis.fit.r_squared
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! SeriesSource::fetch ──▶ RawSeries
//!                            │
//!                            ▼  reconcile (cutover merge, row cleaning)
//!                      Vec<Observation> + ReconcileReport
//!                            │
//!                            ▼  fit_power_law, project
//!                      FitResult + ProjectionCurve
//! ```
//!
//! Each stage fails fast with an [`AnalysisError`]; no stage retries.

pub mod adapters;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod fit;
pub mod http_client;
pub mod pipeline;
pub mod reconcile;

pub use adapters::{decode_price_csv, CsvFileSource, FixtureSource, RemoteCsvSource};

pub use config::{
    AnalysisConfig, ColumnLayout, DAYS_PER_YEAR, DEFAULT_CUTOVER_INDEX, DEFAULT_EPOCH,
    DEFAULT_LAYOUT, DEFAULT_PROJECTION_YEARS, DEFAULT_SOURCE_URL, MAX_PROJECTION_YEARS,
};

pub use data_source::{SeriesSource, SourceError, SourceErrorKind, SourceKind};

pub use domain::{parse_date, DaysFromEpoch, NaiveTimestamp, Observation, RawObservation, RawSeries};

pub use error::{AnalysisError, ValidationError};

pub use fit::{
    fit_points, fit_power_law, project, project_range, FitResult, ProjectionCurve,
    ProjectionPoint,
};

pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, StaticHttpClient,
    DEFAULT_TIMEOUT_MS,
};

pub use pipeline::{analyze, analyze_raw, Analysis};

pub use reconcile::{reconcile, CutoverPolicy, PriceColumn, ReconcileReport, ReconciledSeries};
