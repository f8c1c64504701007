//! Core configuration types.
//! - SelectConfig holds the immutable options for one run.
//! - Percentage, LedgerMode and LogLevel are small validated value types.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use super::{DEFAULT_LEDGER_FIELD, DEFAULT_SUFFIX};
use crate::errors::SelectError;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Share of each chunk to sample, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "u32")]
pub struct Percentage(u8);

impl Percentage {
    pub const ZERO: Percentage = Percentage(0);
    pub const FULL: Percentage = Percentage(100);

    pub fn get(self) -> u8 {
        self.0
    }

    /// `floor(n * self / 100)`, computed without overflow for any `usize`.
    pub fn of(self, n: usize) -> usize {
        let scaled = n as u128 * u128::from(self.0) / 100;
        scaled as usize
    }
}

impl TryFrom<u32> for Percentage {
    type Error = SelectError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value > 100 {
            return Err(SelectError::PercentageOutOfRange(value));
        }
        Ok(Percentage(value as u8))
    }
}

impl FromStr for Percentage {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u32 = s
            .trim()
            .trim_end_matches('%')
            .parse()
            .map_err(|_| format!("invalid percentage: '{s}'"))?;
        Percentage::try_from(n).map_err(|e| e.to_string())
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// What happens to a ledger file left behind by an earlier run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LedgerMode {
    /// Start a fresh ledger: existing content is discarded.
    #[default]
    Truncate,
    /// Keep existing rows and add new ones after them; the header is only
    /// written when the file is empty.
    Append,
}

impl LedgerMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truncate" | "fresh" | "overwrite" => Some(LedgerMode::Truncate),
            "append" | "keep" => Some(LedgerMode::Append),
            _ => None,
        }
    }
}

impl fmt::Display for LedgerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LedgerMode::Truncate => "truncate",
            LedgerMode::Append => "append",
        })
    }
}

impl FromStr for LedgerMode {
    type Err = SelectError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| SelectError::InvalidLedgerMode(s.to_string()))
    }
}

/// Filename filter applied by the lister. Matching is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFilter {
    pub suffix: Option<String>,
    pub prefix: Option<String>,
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self {
            suffix: Some(DEFAULT_SUFFIX.to_string()),
            prefix: None,
        }
    }
}

impl CandidateFilter {
    /// Accept every entry.
    pub fn any() -> Self {
        Self {
            suffix: None,
            prefix: None,
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.suffix.as_deref().is_none_or(|s| name.ends_with(s))
            && self.prefix.as_deref().is_none_or(|p| name.starts_with(p))
    }
}

/// Runtime configuration for one selection run. Immutable once validated.
#[derive(Debug, Clone)]
pub struct SelectConfig {
    /// Directory holding the candidate files
    pub input_path: PathBuf,
    /// Directory receiving the selected files (and the ledger)
    pub output_path: PathBuf,
    /// Share of each chunk to draw
    pub percentage: Percentage,
    /// Ledger header; only the first column is filled per row
    pub ledger_fields: Vec<String>,
    /// Which directory entries count as candidates
    pub filter: CandidateFilter,
    /// Policy for a pre-existing ledger file
    pub ledger_mode: LedgerMode,
    /// Fixed seed for reproducible draws; None draws one from entropy
    pub seed: Option<u64>,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl SelectConfig {
    /// Construct a config with explicit paths and percentage; other fields use defaults.
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        percentage: Percentage,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            percentage,
            ledger_fields: vec![DEFAULT_LEDGER_FIELD.to_string()],
            filter: CandidateFilter::default(),
            ledger_mode: LedgerMode::default(),
            seed: None,
            log_level: LogLevel::default(),
            log_file: None,
        }
    }
}

/// Split a comma-separated header line into trimmed column names.
/// Rejects an empty list and an empty first column (it carries the filename).
pub fn parse_ledger_fields(header: &str) -> Result<Vec<String>, SelectError> {
    let trimmed = header.trim();
    if trimmed.is_empty() {
        return Err(SelectError::NoLedgerFields);
    }
    let fields: Vec<String> = trimmed.split(',').map(|f| f.trim().to_string()).collect();
    match fields.first() {
        Some(first) if !first.is_empty() => Ok(fields),
        _ => Err(SelectError::NoLedgerFields),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_bounds() {
        assert!(Percentage::try_from(0).is_ok());
        assert!(Percentage::try_from(100).is_ok());
        assert!(matches!(
            Percentage::try_from(101),
            Err(SelectError::PercentageOutOfRange(101))
        ));
    }

    #[test]
    fn percentage_of_floors() {
        let ten = Percentage::try_from(10).unwrap();
        assert_eq!(ten.of(2500), 250);
        assert_eq!(ten.of(1000), 100);
        assert_eq!(ten.of(9), 0);
        assert_eq!(Percentage::try_from(33).unwrap().of(10), 3);
        assert_eq!(Percentage::FULL.of(usize::MAX), usize::MAX);
    }

    #[test]
    fn percentage_from_str_accepts_suffix() {
        assert_eq!("25%".parse::<Percentage>().unwrap().get(), 25);
        assert!("250".parse::<Percentage>().is_err());
        assert!("-1".parse::<Percentage>().is_err());
    }

    #[test]
    fn ledger_fields_are_trimmed() {
        let fields = parse_ledger_fields(" name, rating ,comment ").unwrap();
        assert_eq!(fields, vec!["name", "rating", "comment"]);
    }

    #[test]
    fn ledger_fields_reject_empty() {
        assert!(matches!(parse_ledger_fields("   "), Err(SelectError::NoLedgerFields)));
        assert!(matches!(parse_ledger_fields(",rating"), Err(SelectError::NoLedgerFields)));
    }

    #[test]
    fn filter_suffix_and_prefix() {
        let f = CandidateFilter {
            suffix: Some("JPG".into()),
            prefix: Some("PANO".into()),
        };
        assert!(f.matches("PANO_0001.JPG"));
        assert!(!f.matches("PANO_0001.jpg"));
        assert!(!f.matches("IMG_0001.JPG"));
        assert!(CandidateFilter::any().matches("anything"));
    }

    #[test]
    fn ledger_mode_parse() {
        assert_eq!(LedgerMode::parse("APPEND"), Some(LedgerMode::Append));
        assert_eq!(LedgerMode::parse("truncate"), Some(LedgerMode::Truncate));
        assert!("sideways".parse::<LedgerMode>().is_err());
    }
}
