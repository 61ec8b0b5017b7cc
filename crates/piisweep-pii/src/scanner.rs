//! One-pass detection and redaction of a record

use crate::detector::{DetectorConfig, PIIDetector, RuleBasedDetector};
use crate::error::Result;
use crate::record::Record;
use crate::redactor::{RedactorConfig, StandardRedactor};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Combined detector and redactor settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub detector: DetectorConfig,
    pub redactor: RedactorConfig,
}

/// Result of scanning one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanOutcome {
    /// Redacted copy, or the original values when not PII
    pub record: Record,
    pub is_pii: bool,
}

/// Detects and redacts records, analyzing each one only once.
///
/// Holds only immutable rules, so a single scanner can be shared across
/// threads.
pub struct RecordScanner {
    detector: Arc<RuleBasedDetector>,
    redactor: StandardRedactor,
}

impl RecordScanner {
    pub fn new(config: ScannerConfig) -> Result<Self> {
        let detector = Arc::new(RuleBasedDetector::new(config.detector)?);
        let redactor = StandardRedactor::new(detector.clone(), config.redactor);

        Ok(Self { detector, redactor })
    }

    pub fn detector(&self) -> &RuleBasedDetector {
        &self.detector
    }

    pub fn redactor(&self) -> &StandardRedactor {
        &self.redactor
    }

    pub fn scan(&self, record: &Record) -> ScanOutcome {
        let analysis = self.detector.analyze(record);
        let is_pii = analysis.is_pii();

        let record = if is_pii {
            self.redactor.redact_with_analysis(record, &analysis)
        } else {
            record.clone()
        };

        ScanOutcome { record, is_pii }
    }
}
