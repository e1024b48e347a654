use crate::conflict::{
    is_case_only_change, parent_of, resolve_targets, CaseSensitivity, DirectoryNames,
};
use crate::error::{BasketError, Result};
use crate::fs::Filesystem;
use crate::history::{RenameBatch, RenamePair};
use crate::model::BasketEntry;
use crate::template::{render, RenderOptions, Template};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use ts_rs::TS;

/// Aggregated outcome of an execute or undo call.
///
/// `success_count > 0 && failed_count > 0` is a normal partial result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RenameResult {
    pub success_count: usize,
    pub failed_count: usize,
    /// One `"<file name>: <reason>"` line per failed item, in processing order
    pub errors: Vec<String>,
}

impl RenameResult {
    pub(crate) fn record_failure(&mut self, error: &BasketError) {
        tracing::warn!(error = %error, "rename failed");
        self.failed_count += 1;
        self.errors.push(error.to_string());
    }

    pub fn is_partial(&self) -> bool {
        self.success_count > 0 && self.failed_count > 0
    }
}

/// What an execute call produced: the counts, plus the undo batch when at
/// least one rename went through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub result: RenameResult,
    pub batch: Option<RenameBatch>,
}

/// Performs renames one at a time, in order, skipping past failures.
pub struct RenameExecutor<'a> {
    pub(crate) fs: &'a dyn Filesystem,
    pub(crate) case_sensitivity: CaseSensitivity,
}

impl<'a> RenameExecutor<'a> {
    pub fn new(fs: &'a dyn Filesystem, case_sensitivity: CaseSensitivity) -> Self {
        Self {
            fs,
            case_sensitivity,
        }
    }

    /// Render `entries` with `template` and rename each file in basket order.
    ///
    /// The names are always rendered afresh so an outdated preview can never
    /// drive the batch. Per-file failures are collected, never returned.
    pub fn execute(
        &self,
        entries: &[BasketEntry],
        template: &Template,
        options: RenderOptions,
        target_dir: Option<&Path>,
    ) -> BatchOutcome {
        let targets = resolve_targets(render(entries, template, options), target_dir);
        let mut names = DirectoryNames::new(self.fs, self.case_sensitivity);
        let mut result = RenameResult::default();
        let mut pairs = Vec::new();

        for target in &targets {
            let from = &target.entry.path;
            match self.rename_one(&mut names, from, &target.to) {
                Ok(()) => {
                    tracing::info!(from = %from.display(), to = %target.to.display(), "renamed");
                    result.success_count += 1;
                    pairs.push(RenamePair {
                        old_path: from.clone(),
                        new_path: target.to.clone(),
                        entry: target.entry.clone(),
                    });
                },
                Err(err) => result.record_failure(&err),
            }
        }

        tracing::info!(
            succeeded = result.success_count,
            failed = result.failed_count,
            "rename batch finished"
        );

        let batch = (!pairs.is_empty()).then(|| RenameBatch::new(pairs));
        BatchOutcome { result, batch }
    }

    /// Move one file, refusing to overwrite anything that is not the file itself.
    pub(crate) fn rename_one(
        &self,
        names: &mut DirectoryNames<'_>,
        from: &Path,
        to: &Path,
    ) -> Result<()> {
        if !self.fs.exists(from) {
            return Err(BasketError::source_missing(from));
        }
        if from == to {
            return Ok(());
        }

        let case_only = is_case_only_change(from, to) && names.is_case_insensitive(&parent_of(to));
        if !case_only && self.fs.exists(to) {
            return Err(BasketError::destination_exists(from));
        }

        if case_only {
            self.stage_case_change(from, to)
        } else {
            self.fs.rename(from, to).map_err(|e| BasketError::io(from, &e))
        }
    }

    /// A case-insensitive filesystem may treat `a.jpg -> A.jpg` as a no-op, so go
    /// through a temporary name.
    fn stage_case_change(&self, from: &Path, to: &Path) -> Result<()> {
        let temp = staging_path(to);
        self.fs
            .rename(from, &temp)
            .map_err(|e| BasketError::io(from, &e))?;

        if let Err(err) = self.fs.rename(&temp, to) {
            if let Err(restore) = self.fs.rename(&temp, from) {
                tracing::warn!(
                    temp = %temp.display(),
                    error = %restore,
                    "could not move staged file back"
                );
                return Err(BasketError::stranded(from, &err, &temp));
            }
            return Err(BasketError::io(from, &err));
        }
        Ok(())
    }
}

fn staging_path(to: &Path) -> PathBuf {
    let mut name = OsString::from(to.as_os_str());
    name.push(format!(".{}.photobasket.tmp", std::process::id()));
    PathBuf::from(name)
}
