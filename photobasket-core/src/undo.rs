use crate::apply::{RenameExecutor, RenameResult};
use crate::conflict::DirectoryNames;
use crate::history::RenameBatch;
use crate::model::BasketEntry;

/// Result of reversing a batch, plus the basket entries whose files are back
/// under their old names (in batch order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoOutcome {
    pub result: RenameResult,
    pub restored: Vec<BasketEntry>,
}

impl RenameExecutor<'_> {
    /// Rename every pair of `batch` back, last pair first.
    ///
    /// Reversing in reverse order unwinds chains where a later rename took a
    /// name an earlier one had vacated. Failures are skipped like in execute.
    pub fn undo(&self, batch: &RenameBatch) -> UndoOutcome {
        let mut names = DirectoryNames::new(self.fs, self.case_sensitivity);
        let mut result = RenameResult::default();
        let mut restored = Vec::new();

        for pair in batch.pairs.iter().rev() {
            match self.rename_one(&mut names, &pair.new_path, &pair.old_path) {
                Ok(()) => {
                    tracing::info!(
                        from = %pair.new_path.display(),
                        to = %pair.old_path.display(),
                        "restored"
                    );
                    result.success_count += 1;
                    restored.push(pair.entry.clone());
                },
                Err(err) => result.record_failure(&err),
            }
        }
        restored.reverse();

        tracing::info!(
            restored = result.success_count,
            failed = result.failed_count,
            created_at = %batch.created_at,
            "undo finished"
        );
        UndoOutcome { result, restored }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::CaseSensitivity;
    use crate::fs::{FaultyFilesystem, StdFilesystem};
    use crate::history::RenamePair;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn pair(dir: &Path, from: &str, to: &str) -> RenamePair {
        RenamePair {
            old_path: dir.join(from),
            new_path: dir.join(to),
            entry: BasketEntry::new(dir.join(from), "全景", 1),
        }
    }

    #[test]
    fn test_undo_restores_names() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("1.jpg"), b"a").unwrap();
        fs::write(temp_dir.path().join("2.jpg"), b"b").unwrap();
        let batch = RenameBatch::new(vec![
            pair(temp_dir.path(), "a.jpg", "1.jpg"),
            pair(temp_dir.path(), "b.jpg", "2.jpg"),
        ]);

        let outcome = RenameExecutor::new(&StdFilesystem, CaseSensitivity::Sensitive).undo(&batch);
        assert_eq!(outcome.result.success_count, 2);
        assert_eq!(fs::read(temp_dir.path().join("a.jpg")).unwrap(), b"a");
        assert_eq!(fs::read(temp_dir.path().join("b.jpg")).unwrap(), b"b");
        let restored: Vec<_> = outcome.restored.iter().map(|e| e.file_name()).collect();
        assert_eq!(restored, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_undo_unwinds_chain_in_reverse() {
        // Forward: 1.jpg -> 2.jpg, then x.jpg -> 1.jpg.
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("2.jpg"), b"was one").unwrap();
        fs::write(temp_dir.path().join("1.jpg"), b"was x").unwrap();
        let batch = RenameBatch::new(vec![
            pair(temp_dir.path(), "1.jpg", "2.jpg"),
            pair(temp_dir.path(), "x.jpg", "1.jpg"),
        ]);

        let outcome = RenameExecutor::new(&StdFilesystem, CaseSensitivity::Sensitive).undo(&batch);
        assert_eq!(outcome.result.failed_count, 0);
        assert_eq!(fs::read(temp_dir.path().join("x.jpg")).unwrap(), b"was x");
        assert_eq!(fs::read(temp_dir.path().join("1.jpg")).unwrap(), b"was one");
        assert!(!temp_dir.path().join("2.jpg").exists());
    }

    #[test]
    fn test_undo_skips_failures() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("1.jpg"), b"a").unwrap();
        fs::write(temp_dir.path().join("2.jpg"), b"b").unwrap();
        let batch = RenameBatch::new(vec![
            pair(temp_dir.path(), "a.jpg", "1.jpg"),
            pair(temp_dir.path(), "b.jpg", "2.jpg"),
            pair(temp_dir.path(), "c.jpg", "3.jpg"),
        ]);
        let faulty = FaultyFilesystem::new(StdFilesystem).lock(temp_dir.path().join("1.jpg"));

        let outcome = RenameExecutor::new(&faulty, CaseSensitivity::Sensitive).undo(&batch);
        assert_eq!(outcome.result.success_count, 1);
        assert_eq!(outcome.result.failed_count, 2);
        // Reverse order: 3.jpg first (gone), then 2.jpg, then 1.jpg (locked).
        assert_eq!(
            outcome.result.errors,
            vec!["3.jpg: source file not found", "1.jpg: permission denied"]
        );
        assert_eq!(outcome.restored.len(), 1);
        assert_eq!(outcome.restored[0].file_name(), "b.jpg");
    }

    #[test]
    fn test_undo_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("1.jpg"), b"renamed").unwrap();
        fs::write(temp_dir.path().join("a.jpg"), b"newcomer").unwrap();
        let batch = RenameBatch::new(vec![pair(temp_dir.path(), "a.jpg", "1.jpg")]);

        let outcome = RenameExecutor::new(&StdFilesystem, CaseSensitivity::Sensitive).undo(&batch);
        assert_eq!(outcome.result.errors, vec!["1.jpg: destination already exists"]);
        assert_eq!(fs::read(temp_dir.path().join("a.jpg")).unwrap(), b"newcomer");
    }
}
