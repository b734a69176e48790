mod chart;
mod fit;
mod project;

use powerlaw_core::{
    analyze, AnalysisConfig, ColumnLayout, CsvFileSource, RemoteCsvSource, SeriesSource,
    DEFAULT_SOURCE_URL,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Environment override for the export URL when `--source-url` is absent.
pub const SOURCE_URL_ENV: &str = "POWERLAW_SOURCE_URL";

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let config = build_config(cli, std::env::var(SOURCE_URL_ENV).ok())?;
    let source = build_source(cli, &config);

    let analysis = analyze(source.as_ref(), &config).await?;
    tracing::info!(
        observations = analysis.observations.len(),
        slope = analysis.fit.slope,
        r_squared = analysis.fit.r_squared,
        "fit complete"
    );

    match &cli.command {
        Command::Fit => fit::run(&analysis, cli.format, cli.pretty),
        Command::Project(args) => project::run(args, &analysis, cli.format, cli.pretty),
        Command::Chart(args) => chart::run(args, &analysis, cli.format, cli.pretty),
    }
}

fn build_config(cli: &Cli, env_url: Option<String>) -> Result<AnalysisConfig, CliError> {
    let source_url = cli
        .source_url
        .clone()
        .or(env_url.filter(|url| !url.trim().is_empty()))
        .unwrap_or_else(|| String::from(DEFAULT_SOURCE_URL));

    let config = AnalysisConfig {
        source_url,
        timeout_ms: cli.timeout_ms,
        layout: ColumnLayout::new(cli.timestamp_column, cli.column_a, cli.column_b),
        cutover_index: cli.cutover_index,
        epoch: cli.epoch,
        projection_years: cli.projection_years,
    };
    config.validate()?;
    Ok(config)
}

fn build_source(cli: &Cli, config: &AnalysisConfig) -> Box<dyn SeriesSource> {
    match &cli.input {
        Some(path) => Box::new(CsvFileSource::new(path.clone(), config.layout)),
        None => Box::new(RemoteCsvSource::from_config(config)),
    }
}
