//! Power-law fitting and projection.
//!
//! A power law `price = 10^intercept * days^slope` is a straight line in
//! `log10(days)` vs `log10(price)` space, so the fit is ordinary least
//! squares on the log-transformed points.
//!
//! Every logarithm and division in this module is guarded: a value that
//! would produce NaN or infinity becomes an [`AnalysisError`] instead.

use serde::Serialize;

use crate::{AnalysisError, Observation};

const MIN_DISTINCT_DAYS: usize = 2;

/// Parameters of the fitted line in log-log space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitResult {
    pub slope: f64,
    pub intercept: f64,
    /// Signed Pearson correlation of the log-transformed points.
    pub r_value: f64,
    pub r_squared: f64,
    /// Standard error of the slope; needs at least three points.
    pub std_err: Option<f64>,
    pub observations: usize,
}

impl FitResult {
    /// Multiplier `a` in `price = a * days^slope`.
    pub fn scale(&self) -> f64 {
        10f64.powf(self.intercept)
    }

    /// Fitted `log10(price)` at `log10(days)`.
    pub fn predict_log10(&self, log_days: f64) -> f64 {
        self.slope * log_days + self.intercept
    }

    /// Fitted price at `days`.
    pub fn predict(&self, days: f64) -> Result<f64, AnalysisError> {
        let log_days = checked_log10("days", days)?;
        let price = 10f64.powf(self.predict_log10(log_days));
        if !price.is_finite() {
            return Err(AnalysisError::InvalidDomain {
                field: "projected_price",
                value: price,
            });
        }
        Ok(price)
    }
}

/// Fits a power law to reconciled observations.
pub fn fit_power_law(observations: &[Observation]) -> Result<FitResult, AnalysisError> {
    let points: Vec<(f64, f64)> = observations
        .iter()
        .map(|observation| (observation.days.as_f64(), observation.price))
        .collect();
    fit_points(&points)
}

/// Fits a power law to raw `(days, price)` pairs.
///
/// # Errors
///
/// - [`AnalysisError::InvalidDomain`] if any day or price is not a finite
///   value greater than zero.
/// - [`AnalysisError::InsufficientData`] if fewer than two distinct day
///   values remain, which leaves the slope undefined.
pub fn fit_points(points: &[(f64, f64)]) -> Result<FitResult, AnalysisError> {
    let mut log_days = Vec::with_capacity(points.len());
    let mut log_prices = Vec::with_capacity(points.len());
    for &(days, price) in points {
        log_days.push(checked_log10("days", days)?);
        log_prices.push(checked_log10("price", price)?);
    }

    let distinct = distinct_up_to(&log_days, MIN_DISTINCT_DAYS);
    if distinct < MIN_DISTINCT_DAYS {
        return Err(AnalysisError::InsufficientData {
            required: MIN_DISTINCT_DAYS,
            distinct,
        });
    }

    let n = log_days.len() as f64;
    let mean_x = log_days.iter().sum::<f64>() / n;
    // Identical prices center exactly, so a flat series has zero spread.
    let flat = log_prices.windows(2).all(|pair| pair[0] == pair[1]);
    let mean_y = match log_prices.first() {
        Some(&first) if flat => first,
        _ => log_prices.iter().sum::<f64>() / n,
    };

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (&x, &y) in log_days.iter().zip(&log_prices) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx <= 0.0 {
        return Err(AnalysisError::InsufficientData {
            required: MIN_DISTINCT_DAYS,
            distinct: 1,
        });
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let ss_res: f64 = log_days
        .iter()
        .zip(&log_prices)
        .map(|(&x, &y)| {
            let residual = y - (slope * x + intercept);
            residual * residual
        })
        .sum();

    // No price variance leaves nothing to correlate with.
    let spread = sxx * syy;
    let r_value = if spread > 0.0 {
        (sxy / spread.sqrt()).clamp(-1.0, 1.0)
    } else {
        0.0
    };
    let r_squared = r_value * r_value;

    let std_err = (log_days.len() > 2).then(|| (ss_res / (n - 2.0) / sxx).sqrt());

    let fit = FitResult {
        slope,
        intercept,
        r_value,
        r_squared,
        std_err,
        observations: log_days.len(),
    };
    tracing::info!(
        slope = fit.slope,
        intercept = fit.intercept,
        r_squared = fit.r_squared,
        observations = fit.observations,
        "fitted power law"
    );
    Ok(fit)
}

/// One point of the extrapolated trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionPoint {
    pub days: f64,
    pub price: f64,
}

/// Fitted trend evaluated over `[start, stop]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionCurve {
    pub start: i64,
    pub stop: i64,
    pub points: Vec<ProjectionPoint>,
}

impl ProjectionCurve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&ProjectionPoint> {
        self.points.last()
    }
}

/// Projects `fit` from the first observed day to `horizon_days` past the
/// last observed day.
///
/// # Errors
///
/// [`AnalysisError::InvalidProjectionRange`] for a negative horizon or an
/// empty interval; [`AnalysisError::EmptySeries`] with no observations.
pub fn project(
    fit: &FitResult,
    observations: &[Observation],
    horizon_days: i64,
) -> Result<ProjectionCurve, AnalysisError> {
    let mut days = observations.iter().map(|observation| observation.days.get());
    let Some(first) = days.next() else {
        return Err(AnalysisError::EmptySeries { total_rows: 0 });
    };
    let (start, last) = days.fold((first, first), |(lo, hi), day| (lo.min(day), hi.max(day)));
    let stop = last.saturating_add(horizon_days);

    if horizon_days < 0 {
        return Err(AnalysisError::InvalidProjectionRange { start, stop });
    }

    project_range(fit, start, stop)
}

/// Evaluates `fit` at `stop - start` evenly spaced points covering the
/// closed interval `[start, stop]`, endpoints included.
pub fn project_range(
    fit: &FitResult,
    start: i64,
    stop: i64,
) -> Result<ProjectionCurve, AnalysisError> {
    let width = stop.saturating_sub(start);
    if width <= 0 {
        return Err(AnalysisError::InvalidProjectionRange { start, stop });
    }

    let count = width as usize;
    let step = if count > 1 {
        width as f64 / (count - 1) as f64
    } else {
        0.0
    };

    let points = (0..count)
        .map(|index| {
            let days = if count > 1 && index + 1 == count {
                stop as f64
            } else {
                start as f64 + index as f64 * step
            };
            fit.predict(days).map(|price| ProjectionPoint { days, price })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProjectionCurve {
        start,
        stop,
        points,
    })
}

fn checked_log10(field: &'static str, value: f64) -> Result<f64, AnalysisError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AnalysisError::InvalidDomain { field, value });
    }
    Ok(value.log10())
}

/// Counts distinct values, stopping once `limit` is reached.
fn distinct_up_to(values: &[f64], limit: usize) -> usize {
    let mut seen: Vec<f64> = Vec::with_capacity(limit);
    for &value in values {
        if !seen.contains(&value) {
            seen.push(value);
            if seen.len() >= limit {
                break;
            }
        }
    }
    seen.len()
}
