//! PII redaction

mod mask;
mod standard_redactor;

pub use mask::{NATIONAL_ID_PREFIX, mask_handle, mask_name, mask_national_id, mask_phone};
pub use standard_redactor::StandardRedactor;

use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Trait for redacting PII from records
pub trait PIIRedactor: Send + Sync {
    /// Redact a record given its overall PII verdict.
    ///
    /// Records that are not PII come back borrowed and untouched.
    fn redact<'a>(&self, record: &'a Record, is_pii: bool) -> Cow<'a, Record>;
}

/// Configuration for PII redaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedactorConfig {
    /// Character substituted for hidden characters in phone, email, handle,
    /// and name masks. The national ID prefix is always `XXXX XXXX `.
    pub mask_char: char,

    /// Replacement for passport numbers
    pub passport_placeholder: String,

    /// Replacement for address-family fields
    pub address_placeholder: String,
}

impl Default for RedactorConfig {
    fn default() -> Self {
        Self {
            mask_char: 'X',
            passport_placeholder: "XXXXXXX".to_string(),
            address_placeholder: "[REDACTED_ADDRESS]".to_string(),
        }
    }
}
