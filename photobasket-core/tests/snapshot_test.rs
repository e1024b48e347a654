use photobasket_core::{BasketItem, Session};

fn item(path: &str, label: &str, group: u32) -> BasketItem {
    BasketItem {
        label: Some(label.to_string()),
        group_index: Some(group),
        ..BasketItem::from_path(path)
    }
}

#[test]
fn test_export_snapshot_json() {
    let mut session = Session::new();
    session
        .add_to_basket(vec![
            item("/photos/a.jpg", "全景", 1),
            item("/photos/b.jpg", "接写", 2),
        ])
        .unwrap();

    let snapshot = session.export_basket().unwrap();
    insta::assert_json_snapshot!(snapshot, { ".exportedAt" => "[timestamp]" }, @r#"
    {
      "exportedAt": "[timestamp]",
      "totalCount": 2,
      "items": [
        {
          "order": 1,
          "fileName": "a.jpg",
          "filePath": "/photos/a.jpg",
          "label": "全景",
          "groupIndex": 1
        },
        {
          "order": 2,
          "fileName": "b.jpg",
          "filePath": "/photos/b.jpg",
          "label": "接写",
          "groupIndex": 2
        }
      ]
    }
    "#);
}

#[test]
fn test_preview_rows_json() {
    let mut session = Session::new();
    session
        .add_to_basket(vec![item("/nonexistent-photobasket/IMG_7.JPG", "内部", 3)])
        .unwrap();

    let rows = session.generate_preview(None).unwrap();
    insta::assert_json_snapshot!(rows, @r#"
    [
      {
        "oldName": "IMG_7.JPG",
        "newName": "V-3_内部_001.JPG",
        "conflict": false,
        "oldPath": "/nonexistent-photobasket/IMG_7.JPG",
        "newPath": "/nonexistent-photobasket/V-3_内部_001.JPG"
      }
    ]
    "#);
}
