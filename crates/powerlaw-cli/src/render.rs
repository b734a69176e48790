//! Three-panel SVG chart of observed prices and the fitted trend.
//!
//! Panels share the same data and projection and differ only in axis scale:
//! linear, logarithmic price, and logarithmic on both axes.

use std::path::Path;

use plotters::prelude::*;
use powerlaw_core::Analysis;

use crate::error::CliError;

const DATA_COLOR: RGBColor = RGBColor(31, 119, 180);
const FIT_COLOR: RGBColor = RED;
const X_DESC: &str = "Days From Genesis Block";
const Y_DESC: &str = "Price (USD)";

/// Size and labelling of the rendered document.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub asset: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Bounds {
    fn covering<'a>(points: impl Iterator<Item = &'a (f64, f64)>) -> Option<Self> {
        points.fold(None, |bounds, &(x, y)| {
            Some(match bounds {
                None => Self {
                    x_min: x,
                    x_max: x,
                    y_min: y,
                    y_max: y,
                },
                Some(b) => Self {
                    x_min: b.x_min.min(x),
                    x_max: b.x_max.max(x),
                    y_min: b.y_min.min(y),
                    y_max: b.y_max.max(y),
                },
            })
        })
    }
}

macro_rules! draw_panel {
    ($area:expr, $caption:expr, $x:expr, $y:expr, $data:expr, $fit:expr) => {{
        let mut chart = ChartBuilder::on($area)
            .caption($caption, ("sans-serif", 18))
            .margin(12)
            .x_label_area_size(36)
            .y_label_area_size(72)
            .build_cartesian_2d($x, $y)
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .x_desc(X_DESC)
            .y_desc(Y_DESC)
            .draw()
            .map_err(render_error)?;

        chart
            .draw_series(LineSeries::new($data.iter().copied(), &DATA_COLOR))
            .map_err(render_error)?
            .label("Data")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], DATA_COLOR));

        chart
            .draw_series(LineSeries::new(
                $fit.iter().copied(),
                FIT_COLOR.stroke_width(2),
            ))
            .map_err(render_error)?
            .label("Power Law Fit")
            .legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], FIT_COLOR.stroke_width(2))
            });

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_error)?;
    }};
}

/// Writes the linear, log-y and log-log panels to `path`.
///
/// The document is drawn in memory first, so a failed render leaves `path`
/// untouched.
pub fn render_svg(analysis: &Analysis, path: &Path, spec: &ChartSpec) -> Result<(), CliError> {
    let svg = render_svg_string(analysis, spec)?;
    std::fs::write(path, svg)?;
    tracing::info!(path = %path.display(), "rendered chart");
    Ok(())
}

/// Draws the three panels into an SVG document held in memory.
pub fn render_svg_string(analysis: &Analysis, spec: &ChartSpec) -> Result<String, CliError> {
    let data: Vec<(f64, f64)> = analysis
        .observations
        .iter()
        .map(|observation| (observation.days.as_f64(), observation.price))
        .collect();
    let fit: Vec<(f64, f64)> = analysis
        .projection
        .points
        .iter()
        .map(|point| (point.days, point.price))
        .collect();

    let bounds = Bounds::covering(data.iter().chain(fit.iter()))
        .ok_or_else(|| CliError::Render(String::from("nothing to plot")))?;
    let x_range = bounds.x_min..bounds.x_max;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (spec.width, spec.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;
        let panels = root.split_evenly((3, 1));

        draw_panel!(
            &panels[0],
            caption(analysis, &spec.asset, "Linear Scale"),
            x_range.clone(),
            0.0..bounds.y_max * 1.05,
            data,
            fit
        );
        draw_panel!(
            &panels[1],
            caption(analysis, &spec.asset, "Log-Linear Scale"),
            x_range.clone(),
            (bounds.y_min / 1.5..bounds.y_max * 1.5).log_scale(),
            data,
            fit
        );
        draw_panel!(
            &panels[2],
            caption(analysis, &spec.asset, "Log-Log Scale"),
            x_range.log_scale(),
            (bounds.y_min / 1.5..bounds.y_max * 1.5).log_scale(),
            data,
            fit
        );

        root.present().map_err(render_error)?;
    }

    Ok(svg)
}

fn caption(analysis: &Analysis, asset: &str, scale: &str) -> String {
    format!(
        "{asset} Price - {scale} | Slope: {:.2}, Intercept: {:.2}, R^2: {:.2}",
        analysis.fit.slope, analysis.fit.intercept, analysis.fit.r_squared
    )
}

fn render_error(error: impl std::fmt::Display) -> CliError {
    CliError::Render(error.to_string())
}

#[cfg(test)]
mod tests {
    use powerlaw_core::{analyze_raw, AnalysisConfig, NaiveTimestamp, RawObservation, RawSeries};

    use super::*;

    fn sample_analysis() -> Analysis {
        let rows = (0..30)
            .map(|offset| {
                let day = 400 + offset * 10;
                let ts = NaiveTimestamp::from_date(
                    powerlaw_core::DEFAULT_EPOCH + time::Duration::days(day),
                );
                RawObservation::new(ts, Some(1e-3 * (day as f64).powf(1.5)), None)
            })
            .collect();
        let config = AnalysisConfig {
            cutover_index: 1_000,
            projection_years: 1,
            ..AnalysisConfig::default()
        };
        analyze_raw(&RawSeries::new("fixture", rows), &config).expect("clean series")
    }

    #[test]
    fn writes_three_panel_svg() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("chart.svg");
        let spec = ChartSpec {
            asset: String::from("Test"),
            width: 900,
            height: 900,
        };

        render_svg(&sample_analysis(), &path, &spec).expect("chart renders");

        let svg = std::fs::read_to_string(&path).expect("svg written");
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Log-Log Scale"));
        assert_eq!(svg.matches("Power Law Fit").count(), 3);
    }

    #[test]
    fn failed_render_leaves_existing_output_untouched() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("chart.svg");
        std::fs::write(&path, "previous chart").expect("seed file");

        let mut analysis = sample_analysis();
        analysis.observations.clear();
        analysis.projection.points.clear();
        let spec = ChartSpec {
            asset: String::from("Test"),
            width: 900,
            height: 900,
        };

        let error = render_svg(&analysis, &path, &spec).expect_err("nothing to plot");
        assert_eq!(error.exit_code(), 5);
        assert_eq!(
            std::fs::read_to_string(&path).expect("file still there"),
            "previous chart"
        );
    }

    #[test]
    fn unwritable_output_is_an_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing").join("chart.svg");
        let spec = ChartSpec {
            asset: String::from("Test"),
            width: 600,
            height: 600,
        };

        let error = render_svg(&sample_analysis(), &path, &spec).expect_err("no parent dir");
        assert!(matches!(error, CliError::Io(_)));
        assert_eq!(error.exit_code(), 10);
        assert!(!path.exists());
    }

    #[test]
    fn in_memory_document_matches_written_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("chart.svg");
        let spec = ChartSpec {
            asset: String::from("Test"),
            width: 600,
            height: 600,
        };
        let analysis = sample_analysis();

        let svg = render_svg_string(&analysis, &spec).expect("chart renders");
        render_svg(&analysis, &path, &spec).expect("chart written");

        assert!(svg.trim_start().starts_with("<svg"));
        assert_eq!(std::fs::read_to_string(&path).expect("svg written"), svg);
    }

    #[test]
    fn caption_formats_two_decimals() {
        let analysis = sample_analysis();
        let text = caption(&analysis, "Test", "Linear Scale");
        assert!(text.starts_with("Test Price - Linear Scale | Slope: 1.50"));
    }
}
