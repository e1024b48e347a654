use crate::apply::RenameResult;
use crate::basket::Basket;
use crate::export::ExportSnapshot;
use crate::model::{BasketEntry, PreviewRow};
use crate::presets::LabelPreset;
use crate::preview::{render_errors, render_table};
use pluralizer::pluralize;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// The basket as sent back to a host after every basket operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BasketView {
    pub items: Vec<BasketEntry>,
    pub count: usize,
}

impl From<&Basket> for BasketView {
    fn from(basket: &Basket) -> Self {
        Self {
            items: basket.entries().to_vec(),
            count: basket.len(),
        }
    }
}

/// Result of a label, preset or group update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LabelUpdate {
    pub basket: BasketView,
    pub updated_count: usize,
}

/// Result of a preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PreviewResult {
    pub rows: Vec<PreviewRow>,
    pub conflict_count: usize,
}

impl PreviewResult {
    pub fn new(rows: Vec<PreviewRow>) -> Self {
        let conflict_count = rows.iter().filter(|r| r.conflict).count();
        Self {
            rows,
            conflict_count,
        }
    }

    pub fn summary_line(&self) -> String {
        let mut line = format!("{} to rename", pluralize("file", count(self.rows.len()), true));
        if self.conflict_count > 0 {
            line.push_str(&format!(
                ", {}",
                pluralize("conflict", count(self.conflict_count), true)
            ));
        }
        line
    }

    /// Table followed by the count line.
    pub fn render_summary(&self, use_color: bool) -> String {
        format!("{}\n{}\n", render_table(&self.rows, use_color), self.summary_line())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PresetList {
    pub presets: Vec<LabelPreset>,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for PreviewResult {
    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        self.render_summary(false)
    }
}

impl RenameResult {
    pub fn summary_line(&self, verb: &str) -> String {
        let mut line = format!("✓ {} {}", verb, pluralize("file", count(self.success_count), true));
        if self.failed_count > 0 {
            line.push_str(&format!(", {} failed", self.failed_count));
        }
        line
    }

    pub fn render_summary(&self, verb: &str, use_color: bool) -> String {
        format!(
            "{}\n{}",
            self.summary_line(verb),
            render_errors(&self.errors, use_color)
        )
    }
}

impl OutputFormatter for RenameResult {
    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        self.render_summary("Renamed", false)
    }
}

impl OutputFormatter for PresetList {
    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.presets.is_empty() {
            return "No label presets configured\n".to_string();
        }
        self.presets
            .iter()
            .map(|preset| format!("{}  {}\n", preset.key, preset.label))
            .collect()
    }
}

impl OutputFormatter for ExportSnapshot {
    fn format_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = format!(
            "Exported {} at {}\n",
            pluralize("item", count(self.total_count), true),
            self.exported_at
        );
        for item in &self.items {
            output.push_str(&format!(
                "{:>3}. {} [{} / group {}]\n",
                item.order, item.file_name, item.label, item.group_index
            ));
        }
        output
    }
}

fn count(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}
