use std::fmt::{Display, Formatter};

use serde::ser::Error as SerError;
use serde::{Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::ValidationError;

const DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DATE_TIME: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Timezone-naive wall-clock timestamp.
///
/// Offsets present in the input are dropped without shifting the clock, so
/// `2024-01-01 05:00:00+02:00` becomes `2024-01-01T05:00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NaiveTimestamp(PrimitiveDateTime);

impl NaiveTimestamp {
    pub const fn new(value: PrimitiveDateTime) -> Self {
        Self(value)
    }

    pub const fn from_date(date: Date) -> Self {
        Self(date.midnight())
    }

    /// Parses `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS[.fff]` with an optional
    /// ` UTC`, `Z` or `±HH:MM` suffix, and RFC3339.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if let Ok(date) = Date::parse(trimmed, DATE) {
            return Ok(Self::from_date(date));
        }

        let body = trimmed.strip_suffix(" UTC").unwrap_or(trimmed);
        let mut candidate = body.replacen(' ', "T", 1);
        if !has_offset(&candidate) {
            candidate.push('Z');
        }

        let parsed = OffsetDateTime::parse(&candidate, &Rfc3339).map_err(|_| {
            ValidationError::InvalidTimestamp {
                value: input.to_owned(),
            }
        })?;

        Ok(Self(PrimitiveDateTime::new(parsed.date(), parsed.time())))
    }

    pub const fn date(self) -> Date {
        self.0.date()
    }

    pub const fn into_inner(self) -> PrimitiveDateTime {
        self.0
    }

    /// Whole days elapsed since midnight of `epoch`, rounded toward zero.
    pub fn days_since(self, epoch: Date) -> i64 {
        (self.0 - epoch.midnight()).whole_days()
    }

    fn format(self) -> Result<String, time::error::Format> {
        self.0.format(DATE_TIME)
    }
}

impl Display for NaiveTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let formatted = self.format().map_err(|_| std::fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl Serialize for NaiveTimestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = self.format().map_err(S::Error::custom)?;
        serializer.serialize_str(&formatted)
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<Date, ValidationError> {
    Date::parse(input.trim(), DATE).map_err(|_| ValidationError::InvalidDate {
        value: input.to_owned(),
    })
}

fn has_offset(candidate: &str) -> bool {
    let Some((_, clock)) = candidate.split_once('T') else {
        return false;
    };
    clock.ends_with('Z') || clock.ends_with('z') || clock.contains('+') || clock.contains('-')
}
