//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - CONFIG is optional; without it $PANO_SELECT_CONFIG or the OS default location is used.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{LedgerMode, LogLevel, Percentage, SelectConfig};

/// Select a percentage of panoramic files and move them to a review folder
/// on the same partition.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Sample panoramic images into a review folder")]
pub struct Args {
    /// JSON run descriptor (input_path, output_subfolder, percentage, fields).
    #[arg(value_name = "CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Override the input directory.
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub input: Option<PathBuf>,

    /// Override the output directory.
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Override the share of each chunk to draw (0-100).
    #[arg(long, short = 'p')]
    pub percentage: Option<Percentage>,

    /// Fixed seed for reproducible draws.
    #[arg(long)]
    pub seed: Option<u64>,

    /// What to do with an existing ledger: truncate or append.
    #[arg(long, value_name = "MODE")]
    pub ledger_mode: Option<LedgerMode>,

    /// Override the filename suffix filter (empty string disables it).
    #[arg(long)]
    pub suffix: Option<String>,

    /// Do not ask for confirmation before moving files.
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the config file location that would be used, then exit.
    #[arg(long)]
    pub print_config: bool,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Precedence: --debug > --log-level value > None (use config value).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut SelectConfig) {
        if let Some(input) = &self.input {
            cfg.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            cfg.output_path = output.clone();
        }
        if let Some(p) = self.percentage {
            cfg.percentage = p;
        }
        if let Some(seed) = self.seed {
            cfg.seed = Some(seed);
        }
        if let Some(mode) = self.ledger_mode {
            cfg.ledger_mode = mode;
        }
        if let Some(suffix) = &self.suffix {
            cfg.filter.suffix = (!suffix.is_empty()).then(|| suffix.clone());
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
