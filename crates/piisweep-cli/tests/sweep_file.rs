//! File-level sweep tests

use piisweep_cli::{InputConfig, SweepConfig, SweepStats, default_output_path, sweep_file};
use piisweep_pii::RecordScanner;
use serde_json::Value;
use std::fs;

const INPUT: &str = r#"record_id,Data_json
1,"{""name"": ""Rahul Sharma"", ""email"": ""rahul.sharma@gmail.com"", ""city"": ""Mumbai""}"
2,"{""product"": ""Wireless Mouse"", ""order_value"": 799}"
3,"{""customer_id"": ""C123"", ""contact"": ""rahul@okaxis""}"
4,
5,"{""first_name"": ""Anita"", ""last_name"": ""Desai"", ""address"": ""7 Hill Rd"", ""pin_code"": ""400050"", ""state"": ""MH""}"
"#;

fn read_rows(path: &std::path::Path) -> Vec<(String, Value, String)> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    assert_eq!(
        reader.headers().unwrap().iter().collect::<Vec<_>>(),
        vec!["record_id", "redacted_data_json", "is_pii"]
    );

    reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            (
                r[0].to_string(),
                serde_json::from_str(&r[1]).unwrap(),
                r[2].to_string(),
            )
        })
        .collect()
}

#[test]
fn test_sweep_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("iscp_pii_dataset.csv");
    fs::write(&input, INPUT).unwrap();
    let output = default_output_path(&input);

    let config = SweepConfig::default();
    let scanner = RecordScanner::new(config.scanner_config()).unwrap();
    let stats = sweep_file(&input, &output, &config.input, &scanner).unwrap();

    assert_eq!(
        stats,
        SweepStats {
            processed: 4,
            skipped: 1,
            pii: 3
        }
    );

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 4);

    let (id, record, is_pii) = &rows[0];
    assert_eq!(id, "1");
    assert_eq!(is_pii, "true");
    assert_eq!(record["name"], "RXXXXXXXXXXX");
    assert_eq!(record["email"], "raXXXXXXXXXX@gmail.com");
    assert_eq!(record["city"], "[REDACTED_ADDRESS]");

    let (_, record, is_pii) = &rows[1];
    assert_eq!(is_pii, "false");
    assert_eq!(record["order_value"], 799);

    let (_, record, is_pii) = &rows[2];
    assert_eq!(is_pii, "true");
    assert_eq!(record["contact"], "raXXX@okaxis");
    assert_eq!(record["customer_id"], "C123");

    let (id, record, is_pii) = &rows[3];
    assert_eq!(id, "5");
    assert_eq!(is_pii, "true");
    assert_eq!(record["first_name"], "AXXXX");
    assert_eq!(record["state"], "[REDACTED_ADDRESS]");
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let scanner = RecordScanner::new(Default::default()).unwrap();

    let result = sweep_file(
        &dir.path().join("absent.csv"),
        &dir.path().join("out.csv"),
        &InputConfig::default(),
        &scanner,
    );

    assert!(result.is_err());
}

#[test]
fn test_extra_upi_domain_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("payments.csv");
    fs::write(&input, "record_id,data_json\n1,\"{\"\"vpa\"\": \"\"meera@mybank\"\"}\"\n").unwrap();
    let output = dir.path().join("payments_out.csv");

    let mut config = SweepConfig::default();
    config.merge_vars(|key| (key == "PIISWEEP_EXTRA_UPI_DOMAINS").then(|| "mybank".to_string()));
    let scanner = RecordScanner::new(config.scanner_config()).unwrap();

    let stats = sweep_file(&input, &output, &config.input, &scanner).unwrap();
    assert_eq!(stats.pii, 1);

    let rows = read_rows(&output);
    assert_eq!(rows[0].1["vpa"], "meXXX@mybank");
}
