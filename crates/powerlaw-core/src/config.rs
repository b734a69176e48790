//! Analysis configuration.
//!
//! Defaults describe the bitcoinity.org full-history daily USD export: the
//! timestamp sits in column 0, early prices in column 9, and from row 560
//! onward prices moved to column 3. Day counts start at the Bitcoin genesis
//! block date.

use serde::Serialize;
use time::macros::date;
use time::Date;

use crate::http_client::DEFAULT_TIMEOUT_MS;
use crate::reconcile::CutoverPolicy;
use crate::ValidationError;

pub const DEFAULT_SOURCE_URL: &str = "https://data.bitcoinity.org/export_data.csv?c=e&currency=USD&data_type=price&r=day&t=l&timespan=all";
pub const DEFAULT_CUTOVER_INDEX: usize = 560;
pub const DEFAULT_EPOCH: Date = date!(2009 - 01 - 03);
pub const DEFAULT_PROJECTION_YEARS: i64 = 5;
pub const DAYS_PER_YEAR: i64 = 365;
pub const MAX_PROJECTION_YEARS: i64 = 1_000;
pub const DEFAULT_LAYOUT: ColumnLayout = ColumnLayout::new(0, 9, 3);

/// Positional CSV layout; the upstream header labels are not stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnLayout {
    pub timestamp: usize,
    pub column_a: usize,
    pub column_b: usize,
}

impl ColumnLayout {
    pub const fn new(timestamp: usize, column_a: usize, column_b: usize) -> Self {
        Self {
            timestamp,
            column_a,
            column_b,
        }
    }

    /// Minimum number of columns a header needs for this layout.
    pub fn required_width(self) -> usize {
        self.timestamp.max(self.column_a).max(self.column_b) + 1
    }

    pub fn validate(self) -> Result<(), ValidationError> {
        if self.column_a == self.timestamp || self.column_b == self.timestamp {
            return Err(ValidationError::OverlappingColumns {
                timestamp: self.timestamp,
            });
        }
        Ok(())
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        DEFAULT_LAYOUT
    }
}

/// Settings for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisConfig {
    pub source_url: String,
    pub timeout_ms: u64,
    pub layout: ColumnLayout,
    pub cutover_index: usize,
    #[serde(serialize_with = "serialize_date")]
    pub epoch: Date,
    pub projection_years: i64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            source_url: String::from(DEFAULT_SOURCE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            layout: ColumnLayout::default(),
            cutover_index: DEFAULT_CUTOVER_INDEX,
            epoch: DEFAULT_EPOCH,
            projection_years: DEFAULT_PROJECTION_YEARS,
        }
    }
}

impl AnalysisConfig {
    /// Horizon in days beyond the last observation.
    pub fn projection_days(&self) -> i64 {
        DAYS_PER_YEAR * self.projection_years
    }

    pub fn cutover_policy(&self) -> CutoverPolicy {
        CutoverPolicy::new(self.cutover_index, self.epoch)
    }

    /// Negative horizons are left to the projection step, which reports them
    /// as an invalid projection range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.source_url.trim().is_empty() {
            return Err(ValidationError::EmptySourceUrl);
        }
        if self.timeout_ms == 0 {
            return Err(ValidationError::ZeroTimeout);
        }
        if self.projection_years > MAX_PROJECTION_YEARS {
            return Err(ValidationError::ProjectionYearsTooLarge {
                value: self.projection_years,
                max: MAX_PROJECTION_YEARS,
            });
        }
        self.layout.validate()
    }
}

fn serialize_date<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upstream_export() {
        let config = AnalysisConfig::default();
        assert_eq!(config.cutover_index, 560);
        assert_eq!(config.epoch, date!(2009 - 01 - 03));
        assert_eq!(config.projection_days(), 1825);
        assert_eq!(config.layout, ColumnLayout::new(0, 9, 3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn layout_width_covers_highest_position() {
        assert_eq!(ColumnLayout::default().required_width(), 10);
        assert_eq!(ColumnLayout::new(0, 1, 2).required_width(), 3);
    }

    #[test]
    fn rejects_zero_timeout_and_timestamp_overlap() {
        let config = AnalysisConfig {
            timeout_ms: 0,
            ..AnalysisConfig::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::ZeroTimeout));

        let config = AnalysisConfig {
            layout: ColumnLayout::new(0, 0, 3),
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::OverlappingColumns { timestamp: 0 })
        ));
    }

    #[test]
    fn rejects_unbounded_horizon() {
        let config = AnalysisConfig {
            projection_years: MAX_PROJECTION_YEARS + 1,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::ProjectionYearsTooLarge { .. })
        ));
    }
}
