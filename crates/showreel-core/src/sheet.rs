//! Reading the published sheet's CSV export into [`RawRow`]s.

use crate::error::ShowreelError;
use crate::normalize::RawRow;

/// Parse CSV text with a header row.
///
/// Empty lines are skipped; rows of blank cells (`,,,`) are kept and left for
/// the normalizer to drop. Short rows are tolerated: missing trailing cells
/// simply leave those columns absent.
pub fn parse_csv(text: &str) -> Result<Vec<RawRow>, ShowreelError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.trim_start_matches('\u{feff}').as_bytes());

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(headers.iter().zip(record.iter()).collect());
    }
    Ok(rows)
}
