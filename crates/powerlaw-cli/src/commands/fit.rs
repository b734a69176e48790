use serde::Serialize;

use powerlaw_core::{Analysis, NaiveTimestamp, ReconcileReport};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{self, row};

/// Fit parameters plus the row accounting behind them.
#[derive(Debug, Serialize)]
pub struct FitSummary<'a> {
    pub source: &'a str,
    pub observations: usize,
    pub first_date: Option<NaiveTimestamp>,
    pub last_date: Option<NaiveTimestamp>,
    pub first_day: Option<i64>,
    pub last_day: Option<i64>,
    pub slope: f64,
    pub intercept: f64,
    pub scale: f64,
    pub r_value: f64,
    pub r_squared: f64,
    pub std_err: Option<f64>,
    pub reconcile: ReconcileReport,
}

impl<'a> FitSummary<'a> {
    pub fn from_analysis(analysis: &'a Analysis) -> Self {
        let first = analysis.observations.first();
        let last = analysis.observations.last();
        Self {
            source: &analysis.origin,
            observations: analysis.fit.observations,
            first_date: first.map(|o| o.timestamp),
            last_date: last.map(|o| o.timestamp),
            first_day: first.map(|o| o.days.get()),
            last_day: last.map(|o| o.days.get()),
            slope: analysis.fit.slope,
            intercept: analysis.fit.intercept,
            scale: analysis.fit.scale(),
            r_value: analysis.fit.r_value,
            r_squared: analysis.fit.r_squared,
            std_err: analysis.fit.std_err,
            reconcile: analysis.report,
        }
    }

    pub fn print_table(&self) {
        row("source", self.source);
        if let (Some(first), Some(last)) = (self.first_date, self.last_date) {
            row("range", format!("{first} .. {last}"));
        }
        if let (Some(first), Some(last)) = (self.first_day, self.last_day) {
            row("days", format!("{first} .. {last}"));
        }
        row("observations", self.observations);
        row(
            "dropped rows",
            format!(
                "{} (missing {}, invalid price {}, on/before epoch {})",
                self.reconcile.dropped(),
                self.reconcile.missing_price,
                self.reconcile.invalid_price,
                self.reconcile.non_positive_days
            ),
        );
        row("slope", format!("{:.4}", self.slope));
        row("intercept", format!("{:.4}", self.intercept));
        row("price law", format!("{:.4e} * days^{:.4}", self.scale, self.slope));
        row("r", format!("{:.4}", self.r_value));
        row("r^2", format!("{:.4}", self.r_squared));
        if let Some(std_err) = self.std_err {
            row("slope std err", format!("{std_err:.6}"));
        }
    }
}

pub fn run(analysis: &Analysis, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let summary = FitSummary::from_analysis(analysis);
    output::render(&summary, format, pretty, FitSummary::print_table)
}
