//! PiiSweep CSV front end
//!
//! Reads CSV rows carrying embedded JSON records, runs them through the
//! PII engine, and writes `record_id,redacted_data_json,is_pii` rows.

pub mod config;
pub mod pipeline;

pub use config::{ConfigError, InputConfig, LoggingConfig, SweepConfig};
pub use pipeline::{SweepStats, default_output_path, pii_flag, repair_json, sweep, sweep_file};
