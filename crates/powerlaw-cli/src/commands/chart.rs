use serde::Serialize;

use powerlaw_core::Analysis;

use crate::cli::{ChartArgs, OutputFormat};
use crate::error::CliError;
use crate::output::{self, row};
use crate::render::{render_svg, ChartSpec};

#[derive(Debug, Serialize)]
struct ChartReport {
    output: String,
    observations: usize,
    projection_points: usize,
    slope: f64,
    intercept: f64,
    r_squared: f64,
}

pub fn run(
    args: &ChartArgs,
    analysis: &Analysis,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let spec = ChartSpec {
        asset: args.asset.clone(),
        width: args.width,
        height: args.height,
    };
    render_svg(analysis, &args.output, &spec)?;

    let report = ChartReport {
        output: args.output.display().to_string(),
        observations: analysis.observations.len(),
        projection_points: analysis.projection.len(),
        slope: analysis.fit.slope,
        intercept: analysis.fit.intercept,
        r_squared: analysis.fit.r_squared,
    };
    output::render(&report, format, pretty, |report| {
        row("chart", &report.output);
        row(
            "fit",
            format!(
                "slope {:.2}, intercept {:.2}, r^2 {:.2}",
                report.slope, report.intercept, report.r_squared
            ),
        );
        row(
            "points",
            format!(
                "{} observed, {} projected",
                report.observations, report.projection_points
            ),
        );
    })
}
