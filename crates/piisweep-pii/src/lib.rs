//! PiiSweep PII Detection and Redaction
//!
//! This crate classifies flat key-value records as containing PII and
//! produces masked copies of the ones that do:
//! - Standalone field rules (phone, Aadhar-style ID, passport, email, UPI handle)
//! - Combinatorial rules over name, email, and address field groups
//! - Kind-specific masking that reuses the detector's per-field findings

pub mod detector;
pub mod error;
pub mod record;
pub mod redactor;
pub mod scanner;

pub use detector::{
    Analysis, DetectorConfig, FieldGroup, FieldVerdict, PIIDetector, PIIType, RuleBasedDetector,
};
pub use error::{Error, Result};
pub use record::Record;
pub use redactor::{PIIRedactor, RedactorConfig, StandardRedactor};
pub use scanner::{RecordScanner, ScanOutcome, ScannerConfig};
