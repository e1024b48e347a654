use crate::error::{BasketError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

/// Keys a preset may be bound to (the number row of the keyboard).
pub const PRESET_KEYS: std::ops::RangeInclusive<u8> = 1..=9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LabelPreset {
    pub key: u8,
    pub label: String,
}

impl LabelPreset {
    pub fn new(key: u8, label: impl Into<String>) -> Self {
        Self {
            key,
            label: label.into(),
        }
    }
}

/// Label shortcuts keyed 1-9. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetRegistry {
    presets: BTreeMap<u8, String>,
}

impl PresetRegistry {
    /// Build a registry, rejecting keys outside 1-9, duplicate keys and empty labels.
    pub fn new(presets: impl IntoIterator<Item = LabelPreset>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for preset in presets {
            if !PRESET_KEYS.contains(&preset.key) {
                return Err(BasketError::validation(format!(
                    "preset key {} is outside 1-9",
                    preset.key
                )));
            }
            if preset.label.trim().is_empty() {
                return Err(BasketError::validation(format!(
                    "preset {} has an empty label",
                    preset.key
                )));
            }
            if map.insert(preset.key, preset.label).is_some() {
                return Err(BasketError::validation(format!(
                    "preset key {} is assigned twice",
                    preset.key
                )));
            }
        }
        Ok(Self { presets: map })
    }

    /// All presets in ascending key order.
    pub fn enumerate(&self) -> Vec<LabelPreset> {
        self.presets
            .iter()
            .map(|(key, label)| LabelPreset::new(*key, label.clone()))
            .collect()
    }

    pub fn get(&self, key: u8) -> Result<&str> {
        self.presets
            .get(&key)
            .map(String::as_str)
            .ok_or_else(|| BasketError::state(format!("no label preset is assigned to key {}", key)))
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self {
            presets: default_presets()
                .into_iter()
                .map(|p| (p.key, p.label))
                .collect(),
        }
    }
}

/// Built-in survey-photo labels used when no presets are configured.
pub fn default_presets() -> Vec<LabelPreset> {
    vec![
        LabelPreset::new(1, "全景"),
        LabelPreset::new(2, "接写"),
        LabelPreset::new(3, "内部"),
        LabelPreset::new(4, "測定"),
        LabelPreset::new(5, "詳細"),
        LabelPreset::new(6, "外観"),
    ]
}
