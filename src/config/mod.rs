//! Config module.
//! Provides configuration types, default paths, JSON loading, and validation.

pub mod json;
pub mod paths;
pub mod types;
mod validate;

pub use json::{create_template_config, load_config_from_json_path, parse_config_json};
pub use paths::{CONFIG_ENV_VAR, default_config_path};
pub use types::{CandidateFilter, LedgerMode, LogLevel, Percentage, SelectConfig};
pub use validate::{ensure_same_volume, volume_prefix};

/// File suffix selected when the descriptor does not name one.
pub const DEFAULT_SUFFIX: &str = "JPG";
/// Ledger column used when none are configured.
pub const DEFAULT_LEDGER_FIELD: &str = "filename";
