//! PiiSweep CLI
//!
//! Detects and redacts PII in CSV exports whose rows carry JSON records.
//!
//! Usage:
//! ```bash
//! # Writes customers_redacted.csv next to the input
//! piisweep scan customers.csv
//!
//! # Explicit output and config (YAML or TOML)
//! piisweep scan customers.csv -o clean.csv --config piisweep.yaml
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use piisweep_cli::{SweepConfig, default_output_path, sweep_file};
use piisweep_pii::RecordScanner;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "piisweep")]
#[command(about = "PiiSweep - PII detection and redaction for CSV records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file (YAML or TOML)
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "PIISWEEP_CONFIG",
        global = true
    )]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect and redact PII in a CSV file
    ///
    /// Writes `record_id,redacted_data_json,is_pii` rows with `is_pii` as
    /// lowercase `true`/`false`.
    Scan {
        /// Input CSV with a JSON payload column
        input: PathBuf,

        /// Output CSV (defaults to <input>_redacted.csv)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Print the effective configuration as YAML
    ShowConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match cli.config {
        Some(ref config_path) => {
            let config_path = shellexpand::tilde(config_path).to_string();
            SweepConfig::from_file(&config_path)
                .with_context(|| format!("Failed to load config {}", config_path))?
        }
        None => SweepConfig::default(),
    };

    // Merge environment variables (they override config file)
    config.merge_env();

    // CLI flag has highest precedence
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_tracing(&config.logging.level)?;

    match cli.command {
        Commands::Scan { input, output } => {
            let input = expand(input);
            let output = output.map(expand).unwrap_or_else(|| default_output_path(&input));

            let scanner = RecordScanner::new(config.scanner_config())
                .context("Invalid detector configuration")?;
            let stats = sweep_file(&input, &output, &config.input, &scanner)?;

            info!(
                "Processed {} records ({} with PII, {} skipped) -> {}",
                stats.processed,
                stats.pii,
                stats.skipped,
                output.display()
            );
        }
        Commands::ShowConfig => {
            print!("{}", serde_yaml::to_string(&config)?);
        }
    }

    Ok(())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let log_level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::new(format!("{}", log_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Expand a leading `~` in a path
fn expand(path: PathBuf) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).to_string())
}
