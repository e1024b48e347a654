use crate::basket::Basket;
use crate::error::{BasketError, Result};
use crate::model::BasketEntry;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use ts_rs::TS;

const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExportItem {
    /// 1-based basket position
    pub order: usize,
    pub file_name: String,
    #[ts(type = "string")]
    pub file_path: PathBuf,
    pub label: String,
    pub group_index: u32,
}

/// Read-only snapshot of a basket, suitable for saving or handing to another tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExportSnapshot {
    pub exported_at: String,
    pub total_count: usize,
    pub items: Vec<ExportItem>,
}

/// Snapshot the basket. An empty basket is a validation error.
pub fn export(basket: &Basket) -> Result<ExportSnapshot> {
    if basket.is_empty() {
        return Err(BasketError::validation("basket is empty, nothing to export"));
    }

    let items: Vec<ExportItem> = basket
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| ExportItem {
            order: index + 1,
            file_name: entry.file_name(),
            file_path: entry.path.clone(),
            label: entry.label.clone(),
            group_index: entry.group_index,
        })
        .collect();

    Ok(ExportSnapshot {
        exported_at: chrono::Local::now()
            .format(EXPORT_TIMESTAMP_FORMAT)
            .to_string(),
        total_count: items.len(),
        items,
    })
}

impl ExportSnapshot {
    /// Rebuild basket entries in `order` sequence.
    pub fn to_entries(&self) -> Vec<BasketEntry> {
        let mut items: Vec<&ExportItem> = self.items.iter().collect();
        items.sort_by_key(|item| item.order);
        items
            .into_iter()
            .map(|item| BasketEntry::new(item.file_path.clone(), item.label.clone(), item.group_index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_empty_basket_is_validation_error() {
        let err = export(&Basket::new()).unwrap_err();
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn test_export_numbers_items_from_one() {
        let basket = Basket::from_entries(vec![
            BasketEntry::new("/p/a.jpg", "全景", 1),
            BasketEntry::new("/p/b.jpg", "接写", 2),
        ]);
        let snapshot = export(&basket).unwrap();
        assert_eq!(snapshot.total_count, 2);
        assert_eq!(snapshot.items[0].order, 1);
        assert_eq!(snapshot.items[1].order, 2);
        assert_eq!(snapshot.items[1].file_name, "b.jpg");
        assert_eq!(snapshot.items[1].group_index, 2);
        assert!(chrono::NaiveDateTime::parse_from_str(&snapshot.exported_at, EXPORT_TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_export_does_not_mutate() {
        let basket = Basket::from_entries(vec![BasketEntry::new("/p/a.jpg", "全景", 1)]);
        let before = basket.clone();
        export(&basket).unwrap();
        assert_eq!(basket, before);
    }

    #[test]
    fn test_to_entries_follows_order_field() {
        let basket = Basket::from_entries(vec![
            BasketEntry::new("/p/a.jpg", "x", 1),
            BasketEntry::new("/p/b.jpg", "y", 3),
        ]);
        let mut snapshot = export(&basket).unwrap();
        snapshot.items.reverse();
        assert_eq!(snapshot.to_entries(), basket.entries().to_vec());
    }

    #[test]
    fn test_snapshot_json_field_names() {
        let basket = Basket::from_entries(vec![BasketEntry::new("/p/a.jpg", "x", 1)]);
        let json = serde_json::to_value(export(&basket).unwrap()).unwrap();
        assert!(json.get("exportedAt").is_some());
        assert_eq!(json["totalCount"], 1);
        assert_eq!(json["items"][0]["filePath"], "/p/a.jpg");
        assert_eq!(json["items"][0]["groupIndex"], 1);
    }
}
