use crate::model::BasketEntry;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use ts_rs::TS;

/// One rename that went through: where the file was and where it is now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RenamePair {
    #[ts(type = "string")]
    pub old_path: PathBuf,
    #[ts(type = "string")]
    pub new_path: PathBuf,
    /// The basket entry consumed by this rename, restored by undo
    pub entry: BasketEntry,
}

/// The successful renames of one execute call, in basket order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RenameBatch {
    /// Timestamp when the batch was executed
    pub created_at: String,
    pub pairs: Vec<RenamePair>,
}

impl RenameBatch {
    pub fn new(pairs: Vec<RenamePair>) -> Self {
        Self {
            created_at: chrono::Local::now().to_rfc3339(),
            pairs,
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Holds at most one batch: the most recent one that can still be undone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoLog {
    pending: Option<RenameBatch>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `batch`, discarding whatever was pending.
    pub fn record(&mut self, batch: RenameBatch) {
        if let Some(old) = self.pending.replace(batch) {
            tracing::debug!(
                discarded = old.len(),
                created_at = %old.created_at,
                "superseded pending undo batch"
            );
        }
    }

    /// Remove and return the pending batch. A batch can only be taken once.
    pub fn take(&mut self) -> Option<RenameBatch> {
        self.pending.take()
    }

    pub fn peek(&self) -> Option<&RenameBatch> {
        self.pending.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(from: &str, to: &str) -> RenamePair {
        RenamePair {
            old_path: PathBuf::from(from),
            new_path: PathBuf::from(to),
            entry: BasketEntry::new(from, "全景", 1),
        }
    }

    #[test]
    fn test_record_replaces_pending_batch() {
        let mut log = UndoLog::new();
        assert!(log.is_empty());

        log.record(RenameBatch::new(vec![pair("/a.jpg", "/1.jpg")]));
        log.record(RenameBatch::new(vec![pair("/b.jpg", "/2.jpg"), pair("/c.jpg", "/3.jpg")]));

        assert_eq!(log.peek().unwrap().len(), 2);
        assert_eq!(log.peek().unwrap().pairs[0].old_path, PathBuf::from("/b.jpg"));
    }

    #[test]
    fn test_take_consumes_once() {
        let mut log = UndoLog::new();
        log.record(RenameBatch::new(vec![pair("/a.jpg", "/1.jpg")]));
        assert!(log.take().is_some());
        assert!(log.take().is_none());
        assert!(log.is_empty());
    }

    #[test]
    fn test_batch_timestamp_is_rfc3339() {
        let batch = RenameBatch::new(Vec::new());
        assert!(batch.is_empty());
        assert!(chrono::DateTime::parse_from_rfc3339(&batch.created_at).is_ok());
    }
}
