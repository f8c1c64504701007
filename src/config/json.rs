//! JSON configuration support.
//! - Loads the run descriptor (serde_json) into a SelectConfig.
//! - Writes a template descriptor when the default location is empty.
//!
//! Notes:
//! - This module only reads/writes the config file; directory checks happen in validate.
//! - Unknown fields are rejected so a typo never silently falls back to a default.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::types::{
    CandidateFilter, LedgerMode, LogLevel, Percentage, SelectConfig, parse_ledger_fields,
};
use super::{DEFAULT_LEDGER_FIELD, DEFAULT_SUFFIX};
use crate::errors::SelectError;

/// Struct mirroring the JSON descriptor for deserialization.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonConfig {
    input_path: String,
    #[serde(alias = "output_path")]
    output_subfolder: String,
    percentage: Percentage,
    #[serde(default)]
    fields: Option<String>,
    #[serde(default)]
    suffix: Option<String>,
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default)]
    ledger_mode: Option<String>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    log_level: Option<String>,
    #[serde(default)]
    log_file: Option<String>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.and_then(|v| {
        let t = v.trim();
        if t.is_empty() { None } else { Some(t.to_string()) }
    })
}

fn json_to_config(parsed: JsonConfig) -> Result<SelectConfig> {
    let mut cfg = SelectConfig::new(
        PathBuf::from(parsed.input_path.trim()),
        PathBuf::from(parsed.output_subfolder.trim()),
        parsed.percentage,
    );

    if let Some(header) = parsed.fields.as_deref() {
        cfg.ledger_fields = parse_ledger_fields(header)?;
    }

    // An explicit empty suffix means "no suffix filter".
    cfg.filter = CandidateFilter {
        suffix: match parsed.suffix {
            Some(s) => non_empty(Some(s)),
            None => Some(DEFAULT_SUFFIX.to_string()),
        },
        prefix: non_empty(parsed.prefix),
    };

    if let Some(mode) = non_empty(parsed.ledger_mode) {
        cfg.ledger_mode = mode.parse::<LedgerMode>()?;
    }
    cfg.seed = parsed.seed;

    if let Some(s) = non_empty(parsed.log_level) {
        match LogLevel::parse(&s) {
            Some(level) => cfg.log_level = level,
            None => debug!("Ignoring unknown log_level '{s}' in config"),
        }
    }
    cfg.log_file = non_empty(parsed.log_file).map(PathBuf::from);

    Ok(cfg)
}

/// Parse a descriptor held in memory.
pub fn parse_config_json(contents: &str) -> Result<SelectConfig> {
    let parsed: JsonConfig = serde_json::from_str(contents).context("parse config json")?;
    json_to_config(parsed)
}

/// Load a SelectConfig from a specific JSON file path.
pub fn load_config_from_json_path(path: &Path) -> Result<SelectConfig> {
    if !path.exists() {
        return Err(SelectError::ConfigNotFound(path.to_path_buf()).into());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config json '{}'", path.display()))?;
    let parsed: JsonConfig = serde_json::from_str(&contents)
        .with_context(|| format!("parse config json '{}'", path.display()))?;
    let cfg = json_to_config(parsed)
        .with_context(|| format!("invalid config '{}'", path.display()))?;
    debug!(config = %path.display(), "Loaded config");
    Ok(cfg)
}

/// Write a template descriptor at `path` (creating parent directories).
/// Refuses to overwrite an existing file.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
    }

    let template = serde_json::json!({
        "input_path": "/path/to/panoramics",
        "output_subfolder": "/path/to/panoramics/VISU",
        "percentage": 10,
        "fields": format!("{DEFAULT_LEDGER_FIELD},rating,comment"),
        "suffix": DEFAULT_SUFFIX,
        "ledger_mode": LedgerMode::default().to_string(),
        "log_level": LogLevel::default().to_string(),
    });
    let mut body = serde_json::to_string_pretty(&template).context("render template config")?;
    body.push('\n');

    let mut f = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("create template config '{}'", path.display()))?;
    f.write_all(body.as_bytes())
        .with_context(|| format!("write template config '{}'", path.display()))?;

    info!("Created template config at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_descriptor_uses_defaults() {
        let cfg = parse_config_json(
            r#"{"input_path": "/data/pano", "output_subfolder": "/data/pano/VISU", "percentage": 10}"#,
        )
        .unwrap();
        assert_eq!(cfg.input_path, PathBuf::from("/data/pano"));
        assert_eq!(cfg.output_path, PathBuf::from("/data/pano/VISU"));
        assert_eq!(cfg.percentage.get(), 10);
        assert_eq!(cfg.ledger_fields, vec![DEFAULT_LEDGER_FIELD.to_string()]);
        assert_eq!(cfg.filter.suffix.as_deref(), Some(DEFAULT_SUFFIX));
        assert_eq!(cfg.ledger_mode, LedgerMode::Truncate);
    }

    #[test]
    fn out_of_range_percentage_is_rejected() {
        let err = parse_config_json(
            r#"{"input_path": "/a", "output_subfolder": "/a/b", "percentage": 150}"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("0..=100"), "{err:#}");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = parse_config_json(
            r#"{"input_path": "/a", "output_subfolder": "/a/b", "percentage": 5, "percent": 5}"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("unknown field"), "{err:#}");
    }

    #[test]
    fn empty_suffix_disables_filter() {
        let cfg = parse_config_json(
            r#"{"input_path": "/a", "output_subfolder": "/a/b", "percentage": 5, "suffix": ""}"#,
        )
        .unwrap();
        assert_eq!(cfg.filter.suffix, None);
    }

    #[test]
    fn template_is_loadable() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("nested").join("config.json");
        create_template_config(&path).unwrap();
        let cfg = load_config_from_json_path(&path).unwrap();
        assert_eq!(cfg.ledger_fields.len(), 3);
        assert!(create_template_config(&path).is_err(), "must not overwrite");
    }
}
