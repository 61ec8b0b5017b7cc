use piisweep_pii::{DetectorConfig, RedactorConfig, ScannerConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub detector: DetectorConfig,

    #[serde(default)]
    pub redactor: RedactorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Where records live inside the input CSV
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Column holding the record identifier
    #[serde(default = "default_id_column")]
    pub id_column: String,

    /// Candidate columns holding the JSON payload, first non-blank wins
    #[serde(default = "default_payload_columns")]
    pub payload_columns: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            id_column: default_id_column(),
            payload_columns: default_payload_columns(),
        }
    }
}

impl SweepConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)?
        } else {
            // Default to YAML
            serde_yaml::from_str(&contents)?
        };

        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Merge overrides from an arbitrary variable source
    pub fn merge_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("PIISWEEP_LOG_LEVEL") {
            self.logging.level = val;
        }

        if let Some(val) = var("PIISWEEP_ID_COLUMN") {
            self.input.id_column = val;
        }

        if let Some(val) = var("PIISWEEP_PAYLOAD_COLUMNS") {
            let columns = split_list(&val);
            if !columns.is_empty() {
                self.input.payload_columns = columns;
            }
        }

        if let Some(val) = var("PIISWEEP_EXTRA_UPI_DOMAINS") {
            self.detector.extra_payment_domains.extend(split_list(&val));
        }
    }

    pub fn scanner_config(&self) -> ScannerConfig {
        ScannerConfig {
            detector: self.detector.clone(),
            redactor: self.redactor.clone(),
        }
    }
}

fn split_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_id_column() -> String {
    "record_id".to_string()
}

fn default_payload_columns() -> Vec<String> {
    vec![
        "Data_json".to_string(),
        "data_json".to_string(),
        "json_data".to_string(),
    ]
}
