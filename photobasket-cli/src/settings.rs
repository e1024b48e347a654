use anyhow::Result;
use photobasket_core::config::CONFIG_FILE;
use photobasket_core::Config;
use std::path::{Path, PathBuf};

/// `<user config dir>/photobasket/config.toml`
fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("photobasket").join(CONFIG_FILE))
}

/// Load the first config found: the explicit path, the project config,
/// the user config, else the built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::load_from_path(path);
    }
    if let Some(path) = Config::local_path() {
        return Config::load_from_path(&path);
    }
    match user_config_path() {
        Some(path) if path.exists() => Config::load_from_path(&path),
        _ => Ok(Config::default()),
    }
}
