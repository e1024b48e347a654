use crate::error::{BasketError, Result};
use crate::model::BasketEntry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum MoveDirection {
    MoveUp,
    MoveDown,
}

/// Ordered, path-deduplicated working set of photos waiting to be renamed.
///
/// Position in the basket is the only ordering signal; templates number
/// entries by it. The basket never touches the filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Basket {
    entries: Vec<BasketEntry>,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a basket from entries, dropping later duplicates of a path.
    pub fn from_entries(entries: impl IntoIterator<Item = BasketEntry>) -> Self {
        let mut basket = Self::new();
        basket.add(entries);
        basket
    }

    pub fn entries(&self) -> &[BasketEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|e| e.path == path)
    }

    pub fn position(&self, path: &Path) -> Option<usize> {
        self.entries.iter().position(|e| e.path == path)
    }

    /// Append entries in input order, skipping paths already present.
    ///
    /// Returns how many entries were actually added.
    pub fn add(&mut self, items: impl IntoIterator<Item = BasketEntry>) -> usize {
        let mut added = 0;
        for item in items {
            if self.contains(&item.path) {
                tracing::debug!(path = %item.path.display(), "already in basket, skipping");
                continue;
            }
            self.entries.push(item);
            added += 1;
        }
        added
    }

    /// Insert entries at the front in the given order, skipping paths already present.
    pub fn prepend(&mut self, items: impl IntoIterator<Item = BasketEntry>) -> usize {
        let mut fresh: Vec<BasketEntry> = Vec::new();
        for item in items {
            if self.contains(&item.path) || fresh.iter().any(|f| f.path == item.path) {
                continue;
            }
            fresh.push(item);
        }
        let added = fresh.len();
        fresh.append(&mut self.entries);
        self.entries = fresh;
        added
    }

    /// Remove the entry with this path.
    pub fn remove(&mut self, path: &Path) -> Result<BasketEntry> {
        let index = self.position(path).ok_or_else(|| {
            BasketError::validation(format!("{} is not in the basket", path.display()))
        })?;
        Ok(self.entries.remove(index))
    }

    /// Remove every entry whose path is listed. Paths not present are ignored.
    pub fn remove_all(&mut self, paths: &[PathBuf]) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !paths.contains(&e.path));
        before - self.entries.len()
    }

    /// Swap the entries at `index` and `index + 1`.
    pub fn swap_adjacent(&mut self, index: usize) -> Result<()> {
        if index >= self.entries.len().saturating_sub(1) {
            return Err(BasketError::validation(format!(
                "cannot swap position {} with the next one in a basket of {}",
                index,
                self.entries.len()
            )));
        }
        self.entries.swap(index, index + 1);
        Ok(())
    }

    /// Move the entry at `index` one position towards the front.
    pub fn move_up(&mut self, index: usize) -> Result<()> {
        if index == 0 || index >= self.entries.len() {
            return Err(BasketError::validation(format!(
                "cannot move position {} up in a basket of {}",
                index,
                self.entries.len()
            )));
        }
        self.swap_adjacent(index - 1)
    }

    /// Move the entry at `index` one position towards the back.
    pub fn move_down(&mut self, index: usize) -> Result<()> {
        if index >= self.entries.len().saturating_sub(1) {
            return Err(BasketError::validation(format!(
                "cannot move position {} down in a basket of {}",
                index,
                self.entries.len()
            )));
        }
        self.swap_adjacent(index)
    }

    pub fn reorder(&mut self, direction: MoveDirection, index: usize) -> Result<()> {
        match direction {
            MoveDirection::MoveUp => self.move_up(index),
            MoveDirection::MoveDown => self.move_down(index),
        }
    }

    /// Set the label on every listed path found in the basket.
    ///
    /// Returns the number of entries updated; unknown paths are ignored.
    pub fn update_label(&mut self, paths: &[PathBuf], label: &str) -> usize {
        self.update_matching(paths, |entry| entry.label = label.to_string())
    }

    /// Set the group index on every listed path found in the basket.
    pub fn update_group(&mut self, paths: &[PathBuf], group_index: u32) -> usize {
        self.update_matching(paths, |entry| entry.group_index = group_index)
    }

    fn update_matching<F>(&mut self, paths: &[PathBuf], mut update: F) -> usize
    where
        F: FnMut(&mut BasketEntry),
    {
        let mut count = 0;
        for entry in &mut self.entries {
            if paths.contains(&entry.path) {
                update(entry);
                count += 1;
            }
        }
        count
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str) -> BasketEntry {
        BasketEntry::new(path, "全景", 1)
    }

    fn paths(basket: &Basket) -> Vec<String> {
        basket
            .entries()
            .iter()
            .map(|e| e.path.display().to_string())
            .collect()
    }

    fn abc() -> Basket {
        Basket::from_entries(vec![entry("/a.jpg"), entry("/b.jpg"), entry("/c.jpg")])
    }

    #[test]
    fn test_add_skips_duplicates_and_keeps_order() {
        let mut basket = Basket::new();
        assert_eq!(basket.add(vec![entry("/a.jpg"), entry("/b.jpg")]), 2);
        assert_eq!(basket.add(vec![entry("/b.jpg"), entry("/c.jpg"), entry("/a.jpg")]), 1);
        assert_eq!(paths(&basket), vec!["/a.jpg", "/b.jpg", "/c.jpg"]);
    }

    #[test]
    fn test_add_deduplicates_within_one_call() {
        let mut basket = Basket::new();
        assert_eq!(basket.add(vec![entry("/a.jpg"), entry("/a.jpg")]), 1);
        assert_eq!(basket.len(), 1);
    }

    #[test]
    fn test_remove_existing_and_missing() {
        let mut basket = abc();
        let removed = basket.remove(Path::new("/b.jpg")).unwrap();
        assert_eq!(removed.path, PathBuf::from("/b.jpg"));
        assert_eq!(paths(&basket), vec!["/a.jpg", "/c.jpg"]);

        let err = basket.remove(Path::new("/zzz.jpg")).unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert_eq!(basket.len(), 2);
    }

    #[test]
    fn test_move_up_swaps_with_previous() {
        let mut basket = abc();
        basket.move_up(2).unwrap();
        assert_eq!(paths(&basket), vec!["/a.jpg", "/c.jpg", "/b.jpg"]);
    }

    #[test]
    fn test_move_up_first_is_noop() {
        let mut basket = abc();
        assert!(basket.move_up(0).is_err());
        assert_eq!(paths(&basket), vec!["/a.jpg", "/b.jpg", "/c.jpg"]);
    }

    #[test]
    fn test_move_down_last_is_noop() {
        let mut basket = abc();
        assert!(basket.move_down(2).is_err());
        assert!(basket.move_down(17).is_err());
        assert_eq!(paths(&basket), vec!["/a.jpg", "/b.jpg", "/c.jpg"]);
    }

    #[test]
    fn test_move_down_swaps_with_next() {
        let mut basket = abc();
        basket.move_down(0).unwrap();
        assert_eq!(paths(&basket), vec!["/b.jpg", "/a.jpg", "/c.jpg"]);
    }

    #[test]
    fn test_reorder_dispatches_direction() {
        let mut basket = abc();
        basket.reorder(MoveDirection::MoveDown, 1).unwrap();
        assert_eq!(paths(&basket), vec!["/a.jpg", "/c.jpg", "/b.jpg"]);
        basket.reorder(MoveDirection::MoveUp, 1).unwrap();
        assert_eq!(paths(&basket), vec!["/c.jpg", "/a.jpg", "/b.jpg"]);
    }

    #[test]
    fn test_swap_adjacent_out_of_range() {
        let mut basket = abc();
        assert!(basket.swap_adjacent(2).is_err());
        assert!(Basket::new().swap_adjacent(0).is_err());
    }

    #[test]
    fn test_max_index_is_rejected_without_overflow() {
        let mut basket = abc();
        assert_eq!(basket.move_down(usize::MAX).unwrap_err().kind(), "validation");
        assert_eq!(basket.swap_adjacent(usize::MAX).unwrap_err().kind(), "validation");
        assert_eq!(basket.move_up(usize::MAX).unwrap_err().kind(), "validation");
        assert!(Basket::new().move_down(usize::MAX).is_err());
        assert_eq!(paths(&basket), vec!["/a.jpg", "/b.jpg", "/c.jpg"]);
    }

    #[test]
    fn test_update_label_counts_only_present_paths() {
        let mut basket = abc();
        let count = basket.update_label(
            &[PathBuf::from("/a.jpg"), PathBuf::from("/nope.jpg"), PathBuf::from("/c.jpg")],
            "接写",
        );
        assert_eq!(count, 2);
        assert_eq!(basket.entries()[0].label, "接写");
        assert_eq!(basket.entries()[1].label, "全景");
        assert_eq!(basket.entries()[2].label, "接写");
    }

    #[test]
    fn test_update_label_without_matches_leaves_basket_unchanged() {
        let mut basket = abc();
        let before = basket.clone();
        assert_eq!(basket.update_label(&[PathBuf::from("/x.jpg")], "内部"), 0);
        assert_eq!(basket, before);
    }

    #[test]
    fn test_update_group() {
        let mut basket = abc();
        assert_eq!(basket.update_group(&[PathBuf::from("/b.jpg")], 3), 1);
        assert_eq!(basket.entries()[1].group_index, 3);
    }

    #[test]
    fn test_prepend_restores_in_order_ahead_of_existing() {
        let mut basket = Basket::from_entries(vec![entry("/c.jpg")]);
        let added = basket.prepend(vec![entry("/a.jpg"), entry("/c.jpg"), entry("/b.jpg")]);
        assert_eq!(added, 2);
        assert_eq!(paths(&basket), vec!["/a.jpg", "/b.jpg", "/c.jpg"]);
    }

    #[test]
    fn test_remove_all_and_clear() {
        let mut basket = abc();
        assert_eq!(basket.remove_all(&[PathBuf::from("/a.jpg"), PathBuf::from("/q.jpg")]), 1);
        assert_eq!(basket.len(), 2);
        basket.clear();
        assert!(basket.is_empty());
    }
}
