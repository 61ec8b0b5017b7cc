//! Error types for PiiSweep PII

use thiserror::Error;

/// Errors raised while building detectors and redactors.
///
/// Detection and redaction themselves never fail; only construction does.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid detection pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
