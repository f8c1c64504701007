//! Default path helpers.
//! Determines where the JSON descriptor is looked up when none is given on the command line.

use anyhow::{Result, anyhow};
use dirs::config_dir;
use std::env;
use std::path::PathBuf;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "PANO_SELECT_CONFIG";

/// Config path resolution:
/// 1) `$PANO_SELECT_CONFIG` if set and non-empty
/// 2) `<os config dir>/pano_select/config.json`
/// 3) `$HOME/.config/pano_select/config.json`
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    if let Some(mut base) = config_dir() {
        base.push("pano_select");
        base.push("config.json");
        return Ok(base);
    }
    env::var("HOME")
        .map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join("pano_select")
                .join("config.json")
        })
        .map_err(|_| anyhow!("neither a config dir nor $HOME is available"))
}

/// True when the config location came from the environment rather than the OS default.
pub fn config_path_from_env() -> bool {
    env::var_os(CONFIG_ENV_VAR).is_some_and(|p| !p.is_empty())
}
