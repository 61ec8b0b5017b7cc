//! Record representation shared by the detector and redactor

use serde_json::{Map, Value};

/// A flat mapping from field name to scalar value, in input order.
pub type Record = Map<String, Value>;

pub const PHONE: &str = "phone";
pub const AADHAR: &str = "aadhar";
pub const PASSPORT: &str = "passport";
pub const EMAIL: &str = "email";
pub const UPI_ID: &str = "upi_id";
pub const NAME: &str = "name";
pub const FIRST_NAME: &str = "first_name";
pub const LAST_NAME: &str = "last_name";
pub const ADDRESS: &str = "address";
pub const CITY: &str = "city";
pub const PIN_CODE: &str = "pin_code";
pub const STATE: &str = "state";

/// Reduce a value to its trimmed text form.
///
/// Returns `None` for null, booleans, arrays, objects, and values that are
/// blank after trimming. Such values never carry PII.
pub fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => return None,
    };

    if text.is_empty() { None } else { Some(text) }
}

/// Trimmed text of a named field, if present and non-blank.
pub fn field_text(record: &Record, field: &str) -> Option<String> {
    record.get(field).and_then(scalar_text)
}
