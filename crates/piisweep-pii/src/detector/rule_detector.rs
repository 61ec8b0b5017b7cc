//! Rule-based PII detector implementation

use crate::detector::rules::RuleSet;
use crate::detector::{Analysis, DetectorConfig, FieldGroup, FieldVerdict, PIIDetector};
use crate::error::{Error, Result};
use crate::record::{self, Record, field_text, scalar_text};
use std::collections::BTreeSet;
use tracing::trace;

/// Fields that count toward address completeness (`state` does not)
const ADDRESS_PARTS: [&str; 3] = [record::ADDRESS, record::CITY, record::PIN_CODE];

/// Detector driven by the standalone rule table and group rules
#[derive(Debug, Clone)]
pub struct RuleBasedDetector {
    config: DetectorConfig,
    rules: RuleSet,
}

impl RuleBasedDetector {
    /// Create a detector with the given configuration
    pub fn new(config: DetectorConfig) -> Result<Self> {
        if config.combination_threshold == 0 {
            return Err(Error::InvalidConfig(
                "combination_threshold must be at least 1".to_string(),
            ));
        }

        let rules = RuleSet::standard(&config.extra_payment_domains)?;

        Ok(Self { config, rules })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Standalone verdict for every non-blank scalar field, in record order
    pub fn check_fields(&self, record: &Record) -> Vec<(String, FieldVerdict)> {
        record
            .iter()
            .filter_map(|(field, value)| {
                let text = scalar_text(value)?;
                let verdict = match self.rules.classify(field, &text) {
                    Some(kind) => FieldVerdict::Pii(kind),
                    None => FieldVerdict::Clear,
                };
                Some((field.clone(), verdict))
            })
            .collect()
    }

    /// Groups whose fields are present and complete enough to identify someone
    pub fn satisfied_groups(&self, record: &Record) -> BTreeSet<FieldGroup> {
        let mut groups = BTreeSet::new();

        if self.has_name(record) {
            groups.insert(FieldGroup::Name);
        }

        if field_text(record, record::EMAIL).is_some_and(|email| self.rules.is_email(&email)) {
            groups.insert(FieldGroup::Email);
        }

        let address_parts = ADDRESS_PARTS
            .iter()
            .filter(|field| field_text(record, field).is_some())
            .count();
        if address_parts >= 2 {
            groups.insert(FieldGroup::Address);
        }

        groups
    }

    /// Whether enough groups co-occur to make the record PII
    pub fn is_combinatorial(&self, record: &Record) -> bool {
        self.satisfied_groups(record).len() >= self.config.combination_threshold
    }

    fn has_name(&self, record: &Record) -> bool {
        let full_name = field_text(record, record::NAME).is_some_and(|name| is_full_name(&name));

        full_name
            || (field_text(record, record::FIRST_NAME).is_some()
                && field_text(record, record::LAST_NAME).is_some())
    }
}

/// Two or more whitespace-separated tokens, each purely alphabetic
fn is_full_name(name: &str) -> bool {
    let parts: Vec<&str> = name.split_whitespace().collect();
    parts.len() >= 2 && parts.iter().all(|p| p.chars().all(char::is_alphabetic))
}

impl PIIDetector for RuleBasedDetector {
    fn analyze(&self, record: &Record) -> Analysis {
        let verdicts = self.check_fields(record);
        let groups = self.satisfied_groups(record);
        let combinatorial = groups.len() >= self.config.combination_threshold;

        trace!(
            fields = record.len(),
            standalone = verdicts.iter().filter(|(_, v)| v.is_pii()).count(),
            groups = groups.len(),
            combinatorial,
            "analyzed record"
        );

        Analysis {
            verdicts,
            groups,
            combinatorial,
        }
    }
}
