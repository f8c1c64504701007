//! Config validation logic.
//! Verifies the same-partition precondition, the input directory, and that
//! input and output are distinct directories.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use super::types::SelectConfig;
use crate::errors::SelectError;

/// Number of leading path characters compared by the same-partition check.
const VOLUME_PREFIX_CHARS: usize = 2;

/// Leading characters of `path` that identify its partition ("C:" or "/d").
pub fn volume_prefix(path: &Path) -> String {
    path.to_string_lossy()
        .chars()
        .take(VOLUME_PREFIX_CHARS)
        .collect()
}

/// Setup-fatal check: output must share the input's short path prefix, otherwise
/// a move would not be a plain rename. Touches nothing on disk.
pub fn ensure_same_volume(input: &Path, output: &Path) -> Result<(), SelectError> {
    let prefix = volume_prefix(input);
    if output.to_string_lossy().starts_with(prefix.as_str()) {
        return Ok(());
    }
    error!(
        input = %input.display(),
        output = %output.display(),
        %prefix,
        "Input and output are not on the same partition"
    );
    Err(SelectError::NotSameVolume {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        prefix,
    })
}

impl SelectConfig {
    /// Validate the run options before anything is listed or moved.
    ///
    /// - output must be on the input's partition (checked first, no side effects)
    /// - ledger header must name at least one column
    /// - input must exist, be a directory and be readable
    /// - input and output must not resolve to the same directory
    pub fn validate(&self) -> Result<()> {
        ensure_same_volume(&self.input_path, &self.output_path)?;

        if self.ledger_fields.first().is_none_or(|f| f.is_empty()) {
            return Err(SelectError::NoLedgerFields.into());
        }

        ensure_input_dir(&self.input_path)?;

        let input_real = dunce::canonicalize(&self.input_path)
            .unwrap_or_else(|_| self.input_path.clone());
        let output_real = dunce::canonicalize(&self.output_path)
            .unwrap_or_else(|_| self.output_path.clone());
        if input_real == output_real {
            return Err(SelectError::SameDirectory(input_real).into());
        }
        if self.output_path.exists() && !self.output_path.is_dir() {
            bail!(
                "output_path exists but isn't a directory: {}",
                self.output_path.display()
            );
        }

        info!(
            "Config validated: input='{}' output='{}' percentage={} ledger_mode={}",
            self.input_path.display(),
            self.output_path.display(),
            self.percentage,
            self.ledger_mode
        );
        Ok(())
    }
}

/// Input must exist, be a directory, and list without error.
fn ensure_input_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        error!("input_path does not exist or is not a directory: {}", path.display());
        return Err(SelectError::InputInvalid(path.to_path_buf()).into());
    }
    fs::read_dir(path).with_context(|| {
        format!("Cannot read input directory '{}'; check permissions", path.display())
    })?;
    debug!("input_path readable: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::Percentage;

    #[test]
    fn prefix_takes_two_chars() {
        assert_eq!(volume_prefix(Path::new("/data/a")), "/d");
        assert_eq!(volume_prefix(Path::new("D:\\photos")), "D:");
        assert_eq!(volume_prefix(Path::new("x")), "x");
    }

    #[test]
    fn differing_prefix_is_rejected() {
        let err = ensure_same_volume(Path::new("/data/a"), Path::new("/other/b")).unwrap_err();
        assert!(matches!(err, SelectError::NotSameVolume { .. }));
    }

    #[test]
    fn shared_prefix_is_accepted() {
        assert!(ensure_same_volume(Path::new("/data/a"), Path::new("/data/a/VISU")).is_ok());
        assert!(ensure_same_volume(Path::new("/data/a"), Path::new("/dump/b")).is_ok());
    }

    #[test]
    fn validate_rejects_same_directory() {
        let td = tempfile::tempdir().unwrap();
        let cfg = SelectConfig::new(td.path(), td.path(), Percentage::ZERO);
        let err = cfg.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SelectError>(),
            Some(SelectError::SameDirectory(_))
        ));
    }

    #[test]
    fn validate_rejects_missing_input() {
        let td = tempfile::tempdir().unwrap();
        let cfg = SelectConfig::new(
            td.path().join("missing"),
            td.path().join("out"),
            Percentage::ZERO,
        );
        let err = cfg.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SelectError>(),
            Some(SelectError::InputInvalid(_))
        ));
    }
}
