//! Series reconciliation.
//!
//! Merges the two price columns of a [`RawSeries`] at a row boundary and
//! drops every row that could not survive a logarithm downstream. Every
//! dropped row is counted in a [`ReconcileReport`].

use serde::Serialize;
use time::Date;

use crate::domain::validate_positive;
use crate::{AnalysisError, DaysFromEpoch, Observation, RawObservation, RawSeries};

/// Price column selected for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceColumn {
    A,
    B,
}

/// Two-branch merge rule: rows before `cutover_index` read column A, rows
/// at or after it read column B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutoverPolicy {
    pub cutover_index: usize,
    pub epoch: Date,
}

impl CutoverPolicy {
    pub const fn new(cutover_index: usize, epoch: Date) -> Self {
        Self {
            cutover_index,
            epoch,
        }
    }

    pub const fn column_for(self, index: usize) -> PriceColumn {
        if index < self.cutover_index {
            PriceColumn::A
        } else {
            PriceColumn::B
        }
    }

    pub fn price_for(self, index: usize, row: &RawObservation) -> Option<f64> {
        match self.column_for(index) {
            PriceColumn::A => row.column_a,
            PriceColumn::B => row.column_b,
        }
    }
}

/// Row accounting for one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub total_rows: usize,
    pub missing_price: usize,
    pub invalid_price: usize,
    pub non_positive_days: usize,
    pub retained: usize,
}

impl ReconcileReport {
    pub fn dropped(&self) -> usize {
        self.missing_price + self.invalid_price + self.non_positive_days
    }
}

/// Reconciled observations plus the accounting that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledSeries {
    pub observations: Vec<Observation>,
    pub report: ReconcileReport,
}

/// Builds the canonical observation sequence from `raw`.
///
/// Source order is preserved. Rows with a missing or NaN price, a
/// non-positive or infinite price, or a day count at or before the epoch
/// are dropped and counted.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptySeries`] when no row survives.
pub fn reconcile(raw: &RawSeries, policy: CutoverPolicy) -> Result<ReconciledSeries, AnalysisError> {
    let mut report = ReconcileReport {
        total_rows: raw.len(),
        ..ReconcileReport::default()
    };
    let mut observations = Vec::with_capacity(raw.len());

    for (index, row) in raw.rows.iter().enumerate() {
        let price = match policy.price_for(index, row) {
            Some(price) if !price.is_nan() => price,
            _ => {
                report.missing_price += 1;
                continue;
            }
        };
        if validate_positive("price", price).is_err() {
            report.invalid_price += 1;
            continue;
        }
        let Ok(days) = DaysFromEpoch::between(policy.epoch, row.timestamp) else {
            report.non_positive_days += 1;
            continue;
        };

        observations.push(Observation::new(row.timestamp, price, days)?);
    }

    report.retained = observations.len();

    if report.dropped() > 0 {
        tracing::warn!(
            origin = %raw.origin,
            missing_price = report.missing_price,
            invalid_price = report.invalid_price,
            non_positive_days = report.non_positive_days,
            retained = report.retained,
            "dropped rows during reconciliation"
        );
    }

    if observations.is_empty() {
        return Err(AnalysisError::EmptySeries {
            total_rows: report.total_rows,
        });
    }

    tracing::debug!(retained = report.retained, "reconciled price series");
    Ok(ReconciledSeries {
        observations,
        report,
    })
}
