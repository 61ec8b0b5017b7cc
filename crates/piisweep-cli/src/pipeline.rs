//! CSV sweep: one embedded JSON record per row in, one redacted row out
//!
//! The `is_pii` column is written as lowercase `true`/`false`, not the
//! capitalized `True`/`False` some older exports used.

use crate::config::InputConfig;
use anyhow::{Context, Result};
use piisweep_pii::{Record, RecordScanner};
use serde_json::Value;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Header of the output CSV
pub const OUTPUT_HEADER: [&str; 3] = ["record_id", "redacted_data_json", "is_pii"];

/// Text written to the `is_pii` column
pub fn pii_flag(is_pii: bool) -> &'static str {
    if is_pii { "true" } else { "false" }
}

/// Counters for one sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Rows written to the output
    pub processed: usize,

    /// Rows dropped (no payload or unreadable)
    pub skipped: usize,

    /// Written rows flagged as PII
    pub pii: usize,
}

/// `data.csv` becomes `data_redacted.csv`; other names get the suffix appended
pub fn default_output_path(input: &Path) -> PathBuf {
    let text = input.to_string_lossy();
    match text.strip_suffix(".csv") {
        Some(stem) => PathBuf::from(format!("{stem}_redacted.csv")),
        None => PathBuf::from(format!("{text}_redacted.csv")),
    }
}

/// Undo the quoting that spreadsheet exports wrap around JSON cells
pub fn repair_json(raw: &str) -> String {
    let trimmed = raw.trim();
    let unwrapped = if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };
    unwrapped.replace("\"\"", "\"")
}

/// Sweep `input` into `output`, creating or truncating the output file
pub fn sweep_file(
    input: &Path,
    output: &Path,
    config: &InputConfig,
    scanner: &RecordScanner,
) -> Result<SweepStats> {
    let reader = File::open(input)
        .with_context(|| format!("Failed to open input {}", input.display()))?;
    let writer = File::create(output)
        .with_context(|| format!("Failed to create output {}", output.display()))?;

    info!("Sweeping {} -> {}", input.display(), output.display());
    let stats = sweep(reader, writer, config, scanner)?;
    info!(
        processed = stats.processed,
        skipped = stats.skipped,
        pii = stats.pii,
        "Sweep complete: {}",
        output.display()
    );

    Ok(stats)
}

/// Sweep CSV from `reader` into `writer`.
///
/// Bad rows are logged and skipped; only header and output failures abort.
pub fn sweep<R: Read, W: Write>(
    reader: R,
    writer: W,
    config: &InputConfig,
    scanner: &RecordScanner,
) -> Result<SweepStats> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader
        .headers()
        .context("Failed to read CSV header")?
        .clone();
    info!("Input columns: {:?}", headers.iter().collect::<Vec<_>>());

    let mut writer = csv::Writer::from_writer(writer);
    writer
        .write_record(OUTPUT_HEADER)
        .context("Failed to write output header")?;

    let mut stats = SweepStats::default();

    for (index, row) in reader.records().enumerate() {
        let row_number = index + 1;

        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!("Row {} unreadable, skipping: {}", row_number, e);
                stats.skipped += 1;
                continue;
            }
        };

        let cells: Vec<(&str, &str)> = headers.iter().zip(row.iter()).collect();
        let Some((record_id, record)) = extract_record(&cells, row_number, config) else {
            stats.skipped += 1;
            continue;
        };

        let outcome = scanner.scan(&record);
        let redacted = match serde_json::to_string(&outcome.record) {
            Ok(json) => json,
            Err(e) => {
                warn!("Row {} could not be serialized, skipping: {}", row_number, e);
                stats.skipped += 1;
                continue;
            }
        };

        debug!(record_id = %record_id, is_pii = outcome.is_pii, "Processed row {}", row_number);

        writer
            .write_record([record_id.as_str(), redacted.as_str(), pii_flag(outcome.is_pii)])
            .with_context(|| format!("Failed to write output for row {}", row_number))?;

        stats.processed += 1;
        if outcome.is_pii {
            stats.pii += 1;
        }
    }

    writer.flush().context("Failed to flush output")?;
    Ok(stats)
}

/// Record id and parsed record for one row, or `None` when the row has no payload
fn extract_record(
    cells: &[(&str, &str)],
    row_number: usize,
    config: &InputConfig,
) -> Option<(String, Record)> {
    let cell = |column: &str| {
        cells
            .iter()
            .find(|(header, _)| *header == column)
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
    };

    let record_id = cell(config.id_column.as_str())
        .map(String::from)
        .unwrap_or_else(|| row_number.to_string());

    let Some(payload) = config.payload_columns.iter().find_map(|column| cell(column.as_str())) else {
        warn!("Row {} has no JSON data, skipping", row_number);
        return None;
    };

    let record = match serde_json::from_str::<Value>(&repair_json(payload)) {
        Ok(Value::Object(record)) => record,
        Ok(_) => {
            warn!("Row {}: JSON payload is not an object, using raw row", row_number);
            raw_row_record(cells, config)
        }
        Err(e) => {
            warn!("Row {}: bad JSON ({}), using raw row", row_number, e);
            raw_row_record(cells, config)
        }
    };

    Some((record_id, record))
}

/// The row's own columns as a flat string record, minus id and payload columns
fn raw_row_record(cells: &[(&str, &str)], config: &InputConfig) -> Record {
    cells
        .iter()
        .filter(|(header, _)| {
            *header != config.id_column && !config.payload_columns.iter().any(|c| c == header)
        })
        .map(|(header, value)| (header.to_string(), Value::String(value.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use piisweep_pii::ScannerConfig;

    fn scanner() -> RecordScanner {
        RecordScanner::new(ScannerConfig::default()).unwrap()
    }

    fn run(input: &str) -> (SweepStats, Vec<Vec<String>>) {
        let mut output = Vec::new();
        let stats = sweep(input.as_bytes(), &mut output, &InputConfig::default(), &scanner())
            .unwrap();

        let rows = csv::Reader::from_reader(output.as_slice())
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        (stats, rows)
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("data/iscp.csv")),
            PathBuf::from("data/iscp_redacted.csv")
        );
        assert_eq!(
            default_output_path(Path::new("dump.txt")),
            PathBuf::from("dump.txt_redacted.csv")
        );
    }

    #[test]
    fn test_repair_json_unwraps_quotes() {
        assert_eq!(
            repair_json(r#"  "{""phone"": ""9876543210""}"  "#),
            r#"{"phone": "9876543210"}"#
        );
        assert_eq!(repair_json(r#"{"a": 1}"#), r#"{"a": 1}"#);
        assert_eq!(repair_json("\""), "\"");
    }

    #[test]
    fn test_sweep_redacts_pii_rows() {
        let input = "record_id,data_json\n\
                     1,\"{\"\"phone\"\": \"\"9876543210\"\", \"\"order\"\": 12}\"\n\
                     2,\"{\"\"product\"\": \"\"Kettle\"\"}\"\n";

        let (stats, rows) = run(input);
        assert_eq!(stats, SweepStats { processed: 2, skipped: 0, pii: 1 });
        assert_eq!(rows[0], vec!["1", r#"{"phone":"98XXXXXX10","order":12}"#, "true"]);
        assert_eq!(rows[1], vec!["2", r#"{"product":"Kettle"}"#, "false"]);
    }

    #[test]
    fn test_pii_flag_is_lowercase() {
        assert_eq!(pii_flag(true), "true");
        assert_eq!(pii_flag(false), "false");

        let (_, rows) = run("record_id,data_json\n1,\"{\"\"phone\"\": \"\"9876543210\"\"}\"\n");
        assert_eq!(rows[0][2], "true");
        assert_ne!(rows[0][2], "True");
    }

    #[test]
    fn test_missing_payload_skipped() {
        let input = "record_id,data_json\n1,\n2,\"{\"\"a\"\": 1}\"\n";

        let (stats, rows) = run(input);
        assert_eq!(stats.processed, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(rows[0][0], "2");
    }

    #[test]
    fn test_bad_json_falls_back_to_row() {
        let input = "record_id,data_json,phone\n7,{not json,9876543210\n";

        let (stats, rows) = run(input);
        assert_eq!(stats.processed, 1);
        assert_eq!(rows[0], vec!["7", r#"{"phone":"98XXXXXX10"}"#, "true"]);
    }

    #[test]
    fn test_row_number_used_when_id_blank() {
        let input = "record_id,json_data\n,\"{\"\"a\"\": 1}\"\n , \"{\"\"b\"\": 2}\"\n";

        let (_, rows) = run(input);
        assert_eq!(rows[0][0], "1");
        assert_eq!(rows[1][0], "2");
    }

    #[test]
    fn test_non_ascii_kept_verbatim() {
        let input = "record_id,data_json\n1,\"{\"\"city\"\": \"\"München\"\"}\"\n";

        let (_, rows) = run(input);
        assert_eq!(rows[0][1], r#"{"city":"München"}"#);
    }

    #[test]
    fn test_header_written_for_empty_input() {
        let mut output = Vec::new();
        let stats = sweep(
            "record_id,data_json\n".as_bytes(),
            &mut output,
            &InputConfig::default(),
            &scanner(),
        )
        .unwrap();

        assert_eq!(stats, SweepStats::default());
        assert_eq!(String::from_utf8(output).unwrap(), "record_id,redacted_data_json,is_pii\n");
    }
}
