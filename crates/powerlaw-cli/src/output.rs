use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Writes `value` as JSON, or hands off to `table` for terminal output.
pub fn render<T: Serialize>(
    value: &T,
    format: OutputFormat,
    pretty: bool,
    table: impl FnOnce(&T),
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(value)?
            } else {
                serde_json::to_string(value)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => table(value),
    }

    Ok(())
}

/// Prints a `label : value` row with the label padded to a fixed width.
pub fn row(label: &str, value: impl std::fmt::Display) {
    println!("{label:<18}: {value}");
}
