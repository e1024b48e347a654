use crate::conflict::CaseSensitivity;
use crate::presets::{default_presets, LabelPreset, PresetRegistry};
use crate::template::{RenderOptions, DEFAULT_TEMPLATE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory (relative to the working directory) holding a project config.
pub const CONFIG_DIR: &str = ".photobasket";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Label shortcuts bound to keys 1-9
    #[serde(default = "default_presets")]
    pub presets: Vec<LabelPreset>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: DefaultsConfig::default(),
            presets: default_presets(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DefaultsConfig {
    /// Label given to photos added without one
    #[serde(default = "default_label")]
    pub label: String,

    /// Group index given to photos added without one
    #[serde(default = "default_group")]
    pub group: u32,

    /// Template used when a request does not name one
    #[serde(default = "default_template")]
    pub template: String,

    /// Append the source extension when the template has no `{ext}`
    #[serde(default = "default_true")]
    pub append_extension: bool,

    #[serde(default)]
    pub case_sensitivity: CaseSensitivity,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_color: Option<bool>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            label: default_label(),
            group: default_group(),
            template: default_template(),
            append_extension: true,
            case_sensitivity: CaseSensitivity::default(),
            use_color: None,
        }
    }
}

fn default_label() -> String {
    "全景".to_string()
}

fn default_group() -> u32 {
    1
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load config from .photobasket/config.toml if it exists
    pub fn load() -> Result<Self> {
        match Self::local_path() {
            Some(config_path) => Self::load_from_path(&config_path),
            None => Ok(Self::default()),
        }
    }

    /// `.photobasket/config.toml` under the working directory, when present.
    pub fn local_path() -> Option<PathBuf> {
        let config_path = std::env::current_dir()
            .ok()?
            .join(CONFIG_DIR)
            .join(CONFIG_FILE);
        config_path.exists().then_some(config_path)
    }

    /// Load and validate config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.preset_registry()?;
        if self.defaults.group == 0 {
            anyhow::bail!("defaults.group must be at least 1");
        }
        Ok(())
    }

    pub fn preset_registry(&self) -> Result<PresetRegistry> {
        Ok(PresetRegistry::new(self.presets.iter().cloned())?)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            append_extension: self.defaults.append_extension,
        }
    }
}
