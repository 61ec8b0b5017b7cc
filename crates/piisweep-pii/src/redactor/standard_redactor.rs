//! Standard PII redactor implementation

use crate::detector::{Analysis, FieldGroup, PIIDetector, PIIType};
use crate::record::{Record, scalar_text};
use crate::redactor::mask::{mask_handle, mask_name, mask_national_id, mask_phone};
use crate::redactor::{PIIRedactor, RedactorConfig};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::debug;

/// Standard implementation of record redaction
pub struct StandardRedactor {
    detector: Arc<dyn PIIDetector>,
    config: RedactorConfig,
}

impl StandardRedactor {
    /// Create a redactor that consults `detector` for field-level findings
    pub fn new(detector: Arc<dyn PIIDetector>, config: RedactorConfig) -> Self {
        Self { detector, config }
    }

    pub fn config(&self) -> &RedactorConfig {
        &self.config
    }

    /// Build a redacted copy of a record from an analysis already computed for it
    pub fn redact_with_analysis(&self, record: &Record, analysis: &Analysis) -> Record {
        let mut masked = 0usize;

        let redacted: Record = record
            .iter()
            .map(|(field, value)| {
                let replacement = self.redact_field(field, value, analysis);
                if replacement.is_some() {
                    masked += 1;
                }
                (field.clone(), replacement.unwrap_or_else(|| value.clone()))
            })
            .collect();

        debug!(fields = record.len(), masked, "redacted record");
        redacted
    }

    /// Masked replacement for one field, or `None` to keep it as is
    fn redact_field(&self, field: &str, value: &Value, analysis: &Analysis) -> Option<Value> {
        let text = scalar_text(value)?;

        if let Some(kind) = analysis.verdict(field).and_then(|v| v.kind()) {
            return Some(Value::String(self.mask_kind(kind, &text)));
        }

        if analysis.combinatorial {
            let group = FieldGroup::for_field(field)?;
            return Some(Value::String(self.mask_group(group, &text)));
        }

        None
    }

    fn mask_kind(&self, kind: PIIType, text: &str) -> String {
        let mask = self.config.mask_char;
        match kind {
            PIIType::Phone => mask_phone(text, mask),
            PIIType::NationalId => mask_national_id(text),
            PIIType::Passport => self.config.passport_placeholder.clone(),
            PIIType::Email | PIIType::PaymentHandle => mask_handle(text, mask),
        }
    }

    fn mask_group(&self, group: FieldGroup, text: &str) -> String {
        let mask = self.config.mask_char;
        match group {
            FieldGroup::Name => mask_name(text, mask),
            FieldGroup::Email => mask_handle(text, mask),
            FieldGroup::Address => self.config.address_placeholder.clone(),
        }
    }
}

impl PIIRedactor for StandardRedactor {
    fn redact<'a>(&self, record: &'a Record, is_pii: bool) -> Cow<'a, Record> {
        if !is_pii {
            return Cow::Borrowed(record);
        }

        let analysis = self.detector.analyze(record);
        Cow::Owned(self.redact_with_analysis(record, &analysis))
    }
}
