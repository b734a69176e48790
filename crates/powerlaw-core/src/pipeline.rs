//! Loader → Reconciler → Fitter composition.

use serde::Serialize;

use crate::data_source::SeriesSource;
use crate::fit::{fit_power_law, project, FitResult, ProjectionCurve};
use crate::reconcile::{reconcile, ReconcileReport};
use crate::{AnalysisConfig, AnalysisError, Observation, RawSeries};

/// Everything the rendering layer needs from one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub origin: String,
    pub observations: Vec<Observation>,
    pub report: ReconcileReport,
    pub fit: FitResult,
    pub projection: ProjectionCurve,
    pub projection_days: i64,
}

/// Fetches from `source` and runs the full pipeline.
///
/// Nothing is rendered or returned unless every stage succeeds.
pub async fn analyze(
    source: &dyn SeriesSource,
    config: &AnalysisConfig,
) -> Result<Analysis, AnalysisError> {
    config.validate()?;
    tracing::debug!(kind = %source.kind(), location = %source.location(), "loading series");
    let raw = source.fetch().await?;
    analyze_raw(&raw, config)
}

/// Runs reconciliation, fitting and projection on an already loaded series.
pub fn analyze_raw(raw: &RawSeries, config: &AnalysisConfig) -> Result<Analysis, AnalysisError> {
    config.validate()?;

    let reconciled = reconcile(raw, config.cutover_policy())?;
    let fit = fit_power_law(&reconciled.observations)?;
    let projection_days = config.projection_days();
    let projection = project(&fit, &reconciled.observations, projection_days)?;

    Ok(Analysis {
        origin: raw.origin.clone(),
        observations: reconciled.observations,
        report: reconciled.report,
        fit,
        projection,
        projection_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixtureSource, NaiveTimestamp, RawObservation, SourceError};

    fn two_row_config() -> AnalysisConfig {
        AnalysisConfig {
            cutover_index: 2,
            projection_years: 0,
            ..AnalysisConfig::default()
        }
    }

    fn two_rows() -> Vec<RawObservation> {
        ["2009-01-04", "2009-01-05"]
            .iter()
            .zip([1.0, 2.0])
            .map(|(day, price)| {
                RawObservation::new(NaiveTimestamp::parse(day).expect("valid"), Some(price), None)
            })
            .collect()
    }

    #[tokio::test]
    async fn composes_all_stages() {
        let source = FixtureSource::from_rows("two-rows", two_rows());
        let analysis = analyze(&source, &two_row_config())
            .await
            .expect("two clean rows");

        assert_eq!(analysis.observations.len(), 2);
        assert!((analysis.fit.slope - 1.0).abs() < 1e-9);
        assert_eq!(analysis.projection.start, 1);
        assert_eq!(analysis.projection.stop, 2);
        assert_eq!(analysis.projection.len(), 1);
        assert_eq!(analysis.origin, "two-rows");
    }

    #[tokio::test]
    async fn source_failure_short_circuits() {
        let source = FixtureSource::failing("down", SourceError::unavailable("offline"));
        let error = analyze(&source, &AnalysisConfig::default())
            .await
            .expect_err("fetch fails");
        assert!(matches!(error, AnalysisError::SourceUnavailable(_)));
    }

    #[test]
    fn invalid_config_is_rejected_before_work() {
        let raw = RawSeries::new("fixture", two_rows());
        let config = AnalysisConfig {
            timeout_ms: 0,
            ..two_row_config()
        };
        assert!(matches!(
            analyze_raw(&raw, &config),
            Err(AnalysisError::Validation(_))
        ));
    }

    #[test]
    fn negative_horizon_is_invalid_projection_range() {
        let raw = RawSeries::new("fixture", two_rows());
        let config = AnalysisConfig {
            projection_years: -1,
            ..two_row_config()
        };
        assert!(matches!(
            analyze_raw(&raw, &config),
            Err(AnalysisError::InvalidProjectionRange { .. })
        ));
    }
}
