use crate::domain::record::RawRow;
use crate::error::LoadError;

/// Splits CSV text into header-keyed rows.
///
/// Headers and fields are trimmed. Short rows simply lack the trailing keys,
/// extra fields beyond the header are ignored, and rows whose fields are all
/// blank are skipped.
pub fn parse_rows(text: &str) -> Result<Vec<RawRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();

    let mut out = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            tracing::trace!(line = idx + 2, "skipping blank CSV row");
            continue;
        }

        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        out.push(row);
    }

    Ok(out)
}
