//! # Domain Models
//!
//! Canonical types for a single-asset daily price series.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RawObservation`] | Downloaded row with two candidate price columns |
//! | [`RawSeries`] | Raw rows in source order plus their origin |
//! | [`Observation`] | Reconciled row with a positive price and day count |
//! | [`DaysFromEpoch`] | Strictly positive whole-day offset from the epoch |
//! | [`NaiveTimestamp`] | Timezone-naive wall-clock timestamp |
//!
//! Constructors validate their invariants, so an [`Observation`] can never
//! carry a price or day count that would poison a logarithm.

mod models;
mod timestamp;

pub use models::{DaysFromEpoch, Observation, RawObservation, RawSeries};
pub(crate) use models::validate_positive;
pub use timestamp::{parse_date, NaiveTimestamp};
