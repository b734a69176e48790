use serde::Serialize;

use powerlaw_core::{Analysis, ProjectionPoint};

use super::fit::FitSummary;
use crate::cli::{OutputFormat, ProjectArgs};
use crate::error::CliError;
use crate::output::{self, row};

#[derive(Debug, Serialize)]
struct ProjectionReport<'a> {
    fit: FitSummary<'a>,
    horizon_days: i64,
    start: i64,
    stop: i64,
    total_points: usize,
    horizon_price: Option<f64>,
    points: Vec<ProjectionPoint>,
}

impl ProjectionReport<'_> {
    fn print_table(&self) {
        self.fit.print_table();
        row("horizon days", self.horizon_days);
        row(
            "projection",
            format!("{} .. {} ({} points)", self.start, self.stop, self.total_points),
        );
        if let Some(price) = self.horizon_price {
            row("price at horizon", format!("{price:.2}"));
        }
        println!();
        println!("{:>10}  {:>16}", "days", "projected price");
        for point in &self.points {
            println!("{:>10.1}  {:>16.2}", point.days, point.price);
        }
    }
}

pub fn run(
    args: &ProjectArgs,
    analysis: &Analysis,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let report = ProjectionReport {
        fit: FitSummary::from_analysis(analysis),
        horizon_days: analysis.projection_days,
        start: analysis.projection.start,
        stop: analysis.projection.stop,
        total_points: analysis.projection.len(),
        horizon_price: analysis.projection.last().map(|point| point.price),
        points: sample_every(&analysis.projection.points, args.every),
    };
    output::render(&report, format, pretty, ProjectionReport::print_table)
}

/// Every `step`th point, always ending on the final point.
fn sample_every(points: &[ProjectionPoint], step: u64) -> Vec<ProjectionPoint> {
    let step = usize::try_from(step.max(1)).unwrap_or(usize::MAX);
    let mut sampled: Vec<ProjectionPoint> = points.iter().step_by(step).copied().collect();
    if let Some(&last) = points.last() {
        if sampled.last() != Some(&last) {
            sampled.push(last);
        }
    }
    sampled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(count: usize) -> Vec<ProjectionPoint> {
        (0..count)
            .map(|i| ProjectionPoint {
                days: (i + 1) as f64,
                price: (i + 1) as f64 * 10.0,
            })
            .collect()
    }

    #[test]
    fn sampling_keeps_first_and_last() {
        let sampled = sample_every(&points(10), 4);
        let days: Vec<f64> = sampled.iter().map(|p| p.days).collect();
        assert_eq!(days, vec![1.0, 5.0, 9.0, 10.0]);
    }

    #[test]
    fn sampling_does_not_duplicate_last() {
        let sampled = sample_every(&points(9), 4);
        let days: Vec<f64> = sampled.iter().map(|p| p.days).collect();
        assert_eq!(days, vec![1.0, 5.0, 9.0]);
    }

    #[test]
    fn sampling_empty_curve_is_empty() {
        assert!(sample_every(&[], 3).is_empty());
    }
}
