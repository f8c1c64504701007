//! Typed error definitions for pano_select.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectError {
    #[error(
        "input '{}' and output '{}' are not on the same partition (prefix '{prefix}')",
        input.display(),
        output.display()
    )]
    NotSameVolume {
        input: PathBuf,
        output: PathBuf,
        prefix: String,
    },

    #[error("percentage must be within 0..=100, got {0}")]
    PercentageOutOfRange(u32),

    #[error("ledger field list is empty; set `fields` to at least one column name")]
    NoLedgerFields,

    #[error("invalid ledger mode '{0}' (expected 'truncate' or 'append')")]
    InvalidLedgerMode(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Input directory invalid or unreadable: {0}")]
    InputInvalid(PathBuf),

    #[error("input and output resolve to the same directory: {0}")]
    SameDirectory(PathBuf),

    #[error("Ledger write failed for {path}: {context}")]
    Ledger { path: PathBuf, context: String },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl SelectError {
    /// Stable numeric code used in structured logs.
    pub fn code(&self) -> u16 {
        match self {
            SelectError::NotSameVolume { .. } => 10,
            SelectError::PercentageOutOfRange(_) => 11,
            SelectError::NoLedgerFields => 12,
            SelectError::InvalidLedgerMode(_) => 13,
            SelectError::ConfigNotFound(_) => 14,
            SelectError::InputInvalid(_) => 20,
            SelectError::SameDirectory(_) => 21,
            SelectError::Ledger { .. } => 30,
            SelectError::Interrupted => 130,
        }
    }
}
