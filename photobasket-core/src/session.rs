use crate::apply::{RenameExecutor, RenameResult};
use crate::basket::{Basket, MoveDirection};
use crate::config::Config;
use crate::conflict::{annotate, resolve_targets, CaseSensitivity};
use crate::error::{BasketError, Result};
use crate::export::{export, ExportSnapshot};
use crate::fs::{Filesystem, StdFilesystem};
use crate::history::{RenameBatch, UndoLog};
use crate::model::{BasketItem, PreviewRow};
use crate::presets::{LabelPreset, PresetRegistry};
use crate::template::{render, RenderOptions, Template, DEFAULT_TEMPLATE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use ts_rs::TS;

/// Where the session is in the preview/execute cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum WorkflowState {
    #[default]
    Idle,
    PreviewGenerated,
    Executed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionStatus {
    pub state: WorkflowState,
    pub basket_count: usize,
    pub undo_available: bool,
    #[ts(type = "string | null")]
    pub directory: Option<PathBuf>,
}

/// Everything one user works on: the basket, the presets and the pending undo.
///
/// The host owns a session and serialises calls into it; nothing here is global.
pub struct Session {
    basket: Basket,
    presets: PresetRegistry,
    undo_log: UndoLog,
    directory: Option<PathBuf>,
    default_label: String,
    default_group: u32,
    default_template: String,
    render_options: RenderOptions,
    case_sensitivity: CaseSensitivity,
    state: WorkflowState,
    fs: Box<dyn Filesystem>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            basket: Basket::new(),
            presets: PresetRegistry::default(),
            undo_log: UndoLog::new(),
            directory: None,
            default_label: "全景".to_string(),
            default_group: 1,
            default_template: DEFAULT_TEMPLATE.to_string(),
            render_options: RenderOptions::default(),
            case_sensitivity: CaseSensitivity::default(),
            state: WorkflowState::Idle,
            fs: Box::new(StdFilesystem),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            presets: config.preset_registry()?,
            default_label: config.defaults.label.clone(),
            default_group: config.defaults.group,
            default_template: config.defaults.template.clone(),
            render_options: config.render_options(),
            case_sensitivity: config.defaults.case_sensitivity,
            ..Self::new()
        })
    }

    /// Route all filesystem access through `fs`.
    #[must_use]
    pub fn with_filesystem(mut self, fs: impl Filesystem + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    #[must_use]
    pub fn with_case_sensitivity(mut self, case_sensitivity: CaseSensitivity) -> Self {
        self.case_sensitivity = case_sensitivity;
        self
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn pending_undo(&self) -> Option<&RenameBatch> {
        self.undo_log.peek()
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            state: self.state,
            basket_count: self.basket.len(),
            undo_available: !self.undo_log.is_empty(),
            directory: self.directory.clone(),
        }
    }

    /// Any change to the basket invalidates an earlier preview.
    fn touch(&mut self) {
        self.state = WorkflowState::Idle;
    }

    /// Add photos in the given order, skipping ones already in the basket.
    ///
    /// Returns how many were new.
    pub fn add_to_basket(&mut self, items: Vec<BasketItem>) -> Result<usize> {
        if items.is_empty() {
            return Err(BasketError::validation("no items selected"));
        }
        let label = self.default_label.clone();
        let group = self.default_group;
        let added = self
            .basket
            .add(items.into_iter().map(|item| item.into_entry(&label, group)));
        tracing::debug!(added, total = self.basket.len(), "added to basket");
        self.touch();
        Ok(added)
    }

    pub fn remove_from_basket(&mut self, path: &Path) -> Result<()> {
        self.basket.remove(path)?;
        tracing::debug!(path = %path.display(), "removed from basket");
        self.touch();
        Ok(())
    }

    pub fn reorder_basket(&mut self, direction: MoveDirection, index: usize) -> Result<()> {
        self.basket.reorder(direction, index)?;
        self.touch();
        Ok(())
    }

    pub fn clear_basket(&mut self) {
        self.basket.clear();
        self.touch();
    }

    /// Returns the number of entries relabelled. Unknown paths are ignored.
    pub fn update_label(&mut self, paths: &[PathBuf], label: &str) -> usize {
        let updated = self.basket.update_label(paths, label);
        if updated > 0 {
            self.touch();
        }
        updated
    }

    pub fn apply_preset(&mut self, paths: &[PathBuf], key: u8) -> Result<usize> {
        let label = self.presets.get(key)?.to_string();
        Ok(self.update_label(paths, &label))
    }

    pub fn update_group(&mut self, paths: &[PathBuf], group_index: u32) -> Result<usize> {
        if group_index == 0 {
            return Err(BasketError::validation("group must be at least 1"));
        }
        let updated = self.basket.update_group(paths, group_index);
        if updated > 0 {
            self.touch();
        }
        Ok(updated)
    }

    pub fn list_presets(&self) -> Vec<LabelPreset> {
        self.presets.enumerate()
    }

    pub fn set_directory(&mut self, directory: Option<PathBuf>) {
        self.directory = directory;
    }

    /// Compute target names with conflict flags. Touches nothing on disk.
    pub fn generate_preview(&mut self, template: Option<&str>) -> Result<Vec<PreviewRow>> {
        let template = self.ready_template(template)?;
        let rendered = render(self.basket.entries(), &template, self.render_options);
        let targets = resolve_targets(rendered, self.directory.as_deref());
        let rows = annotate(&targets, self.fs.as_ref(), self.case_sensitivity);
        self.state = WorkflowState::PreviewGenerated;
        Ok(rows)
    }

    /// Rename every basket entry. Renamed entries leave the basket; failed
    /// ones stay so they can be retried.
    pub fn execute_rename(&mut self, template: Option<&str>) -> Result<RenameResult> {
        let template = self.ready_template(template)?;
        let outcome = RenameExecutor::new(self.fs.as_ref(), self.case_sensitivity).execute(
            self.basket.entries(),
            &template,
            self.render_options,
            self.directory.as_deref(),
        );

        if let Some(batch) = outcome.batch {
            let renamed: Vec<PathBuf> = batch.pairs.iter().map(|p| p.old_path.clone()).collect();
            self.basket.remove_all(&renamed);
            self.undo_log.record(batch);
        }
        self.state = WorkflowState::Executed;
        Ok(outcome.result)
    }

    /// Reverse the most recent batch. Only one batch is ever kept, and it
    /// is consumed whether or not every file could be restored.
    pub fn undo_last_rename(&mut self) -> Result<RenameResult> {
        let batch = self
            .undo_log
            .take()
            .ok_or_else(|| BasketError::state("nothing to undo"))?;
        let outcome = RenameExecutor::new(self.fs.as_ref(), self.case_sensitivity).undo(&batch);
        self.basket.prepend(outcome.restored);
        self.touch();
        Ok(outcome.result)
    }

    pub fn export_basket(&self) -> Result<ExportSnapshot> {
        export(&self.basket)
    }

    /// Replace the basket with the contents of an exported snapshot.
    pub fn import_basket(&mut self, snapshot: &ExportSnapshot) -> usize {
        self.basket = Basket::from_entries(snapshot.to_entries());
        self.touch();
        self.basket.len()
    }

    fn ready_template(&self, template: Option<&str>) -> Result<Template> {
        let template = Template::parse(template.unwrap_or(&self.default_template))?;
        if self.basket.is_empty() {
            return Err(BasketError::validation("basket is empty"));
        }
        Ok(template)
    }
}
