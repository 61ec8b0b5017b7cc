//! PII detectors

mod rule_detector;
pub mod rules;

pub use rule_detector::RuleBasedDetector;

use crate::record::{self, Record};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Kinds of standalone PII, in detection priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PIIType {
    /// Ten-digit phone number
    Phone,

    /// Aadhar-style national ID (12 digits in groups of 4)
    NationalId,

    /// Passport number (one uppercase letter, seven digits)
    Passport,

    /// Email address
    Email,

    /// UPI-style payment handle (`user@provider`)
    PaymentHandle,
}

impl PIIType {
    /// All kinds in the order rules are evaluated
    pub const PRIORITY: [PIIType; 5] = [
        PIIType::Phone,
        PIIType::NationalId,
        PIIType::Passport,
        PIIType::Email,
        PIIType::PaymentHandle,
    ];
}

/// Logical PII category assembled from co-occurring fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    Name,
    Email,
    Address,
}

impl FieldGroup {
    /// The field family a field name belongs to, if any.
    ///
    /// `state` belongs to the address family for masking, even though it does
    /// not count toward address completeness.
    pub fn for_field(field: &str) -> Option<Self> {
        match field {
            record::NAME | record::FIRST_NAME | record::LAST_NAME => Some(Self::Name),
            record::EMAIL => Some(Self::Email),
            record::ADDRESS | record::CITY | record::PIN_CODE | record::STATE => {
                Some(Self::Address)
            }
            _ => None,
        }
    }
}

/// Standalone verdict for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "verdict", content = "kind")]
pub enum FieldVerdict {
    /// The field alone is PII of the given kind
    Pii(PIIType),

    /// The field was checked and matched no rule
    Clear,
}

impl FieldVerdict {
    pub fn is_pii(&self) -> bool {
        matches!(self, Self::Pii(_))
    }

    pub fn kind(&self) -> Option<PIIType> {
        match self {
            Self::Pii(kind) => Some(*kind),
            Self::Clear => None,
        }
    }
}

/// Everything the detector learned about one record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analysis {
    /// Standalone verdicts for every evaluated field, in record order.
    /// Blank, null, and non-scalar fields are never evaluated and are absent.
    pub verdicts: Vec<(String, FieldVerdict)>,

    /// Groups satisfied by the record
    pub groups: BTreeSet<FieldGroup>,

    /// Whether enough groups are satisfied to make the record PII
    pub combinatorial: bool,
}

impl Analysis {
    /// Overall verdict: any standalone hit, or the combinatorial check
    pub fn is_pii(&self) -> bool {
        self.combinatorial || self.verdicts.iter().any(|(_, v)| v.is_pii())
    }

    /// Verdict for a field; `None` means the field was never evaluated
    pub fn verdict(&self, field: &str) -> Option<FieldVerdict> {
        self.verdicts
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, verdict)| *verdict)
    }

    /// Names of fields that are PII on their own
    pub fn standalone_fields(&self) -> impl Iterator<Item = &str> {
        self.verdicts
            .iter()
            .filter(|(_, v)| v.is_pii())
            .map(|(name, _)| name.as_str())
    }
}

/// Trait for classifying records as PII
pub trait PIIDetector: Send + Sync {
    /// Compute per-field verdicts and group satisfaction for a record
    fn analyze(&self, record: &Record) -> Analysis;

    /// Whether the record contains PII
    fn detect(&self, record: &Record) -> bool {
        self.analyze(record).is_pii()
    }
}

/// Configuration for the rule-based detector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Payment-provider suffixes recognized in addition to the built-in list
    pub extra_payment_domains: Vec<String>,

    /// Number of distinct groups that make a record combinatorially PII
    pub combination_threshold: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            extra_payment_domains: Vec::new(),
            combination_threshold: 2,
        }
    }
}
