use serde::Serialize;
use time::Date;

use crate::{NaiveTimestamp, ValidationError};

/// One row of a downloaded series before reconciliation.
///
/// The two price columns exist because the upstream export moved its price
/// data from one column to another partway through its history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RawObservation {
    pub timestamp: NaiveTimestamp,
    pub column_a: Option<f64>,
    pub column_b: Option<f64>,
}

impl RawObservation {
    pub const fn new(
        timestamp: NaiveTimestamp,
        column_a: Option<f64>,
        column_b: Option<f64>,
    ) -> Self {
        Self {
            timestamp,
            column_a,
            column_b,
        }
    }
}

/// Raw rows in source order, tagged with where they came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawSeries {
    pub origin: String,
    pub rows: Vec<RawObservation>,
}

impl RawSeries {
    pub fn new(origin: impl Into<String>, rows: Vec<RawObservation>) -> Self {
        Self {
            origin: origin.into(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Whole days from the reference epoch; always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DaysFromEpoch(i64);

impl DaysFromEpoch {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::NonPositiveDays { value });
        }
        Ok(Self(value))
    }

    pub fn between(epoch: Date, timestamp: NaiveTimestamp) -> Result<Self, ValidationError> {
        Self::new(timestamp.days_since(epoch))
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

/// Canonical cleaned record consumed by the fitter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    pub timestamp: NaiveTimestamp,
    pub price: f64,
    pub days: DaysFromEpoch,
}

impl Observation {
    pub fn new(
        timestamp: NaiveTimestamp,
        price: f64,
        days: DaysFromEpoch,
    ) -> Result<Self, ValidationError> {
        validate_positive("price", price)?;
        Ok(Self {
            timestamp,
            price,
            days,
        })
    }
}

pub(crate) fn validate_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field, value });
    }
    Ok(())
}
