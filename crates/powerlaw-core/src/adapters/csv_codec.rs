use csv::{ReaderBuilder, StringRecord};

use crate::data_source::SourceError;
use crate::{ColumnLayout, NaiveTimestamp, RawObservation, RawSeries};

/// Decodes a price export with a header row into a [`RawSeries`].
///
/// Columns are addressed by position. Empty cells, `NaN` and non-numeric
/// cells become missing prices; a bad timestamp fails the whole payload.
pub fn decode_price_csv(
    origin: &str,
    payload: &str,
    layout: ColumnLayout,
) -> Result<RawSeries, SourceError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(payload.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| SourceError::schema_mismatch(format!("{origin}: unreadable header: {e}")))?
        .clone();
    let required = layout.required_width();
    if headers.len() < required {
        return Err(SourceError::schema_mismatch(format!(
            "{origin}: header has {} columns, layout needs {required}",
            headers.len()
        )));
    }

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record
            .map_err(|e| SourceError::malformed(format!("{origin}: row {index}: {e}")))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(decode_row(origin, index, &record, layout)?);
    }

    Ok(RawSeries::new(origin, rows))
}

fn decode_row(
    origin: &str,
    index: usize,
    record: &StringRecord,
    layout: ColumnLayout,
) -> Result<RawObservation, SourceError> {
    let raw_timestamp = record.get(layout.timestamp).unwrap_or_default();
    let timestamp = NaiveTimestamp::parse(raw_timestamp)
        .map_err(|e| SourceError::malformed(format!("{origin}: row {index}: {e}")))?;

    Ok(RawObservation::new(
        timestamp,
        parse_price(record.get(layout.column_a)),
        parse_price(record.get(layout.column_b)),
    ))
}

fn parse_price(cell: Option<&str>) -> Option<f64> {
    cell.and_then(|value| value.parse::<f64>().ok())
        .filter(|value| !value.is_nan())
}
