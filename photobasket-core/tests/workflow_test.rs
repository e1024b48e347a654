//! Drives a session through the JSON request boundary, as a host would.

use photobasket_core::{handle_line, Response, Session};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn send(session: &mut Session, request: &Value) -> Response {
    let response = handle_line(session, &request.to_string());
    // Every response must survive a trip through JSON.
    let line = response.to_json_line();
    let parsed: Response = serde_json::from_str(&line).unwrap();
    assert_eq!(parsed, response);
    response
}

fn data(response: Response) -> Value {
    assert!(response.ok, "unexpected warning: {:?}", response.warning);
    response.data.unwrap()
}

#[test]
fn test_full_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    for name in ["IMG_1.JPG", "IMG_2.JPG", "IMG_3.JPG"] {
        fs::write(dir.join(name), name).unwrap();
    }
    let path = |name: &str| dir.join(name).display().to_string();

    let mut session = Session::new();

    let basket = data(send(
        &mut session,
        &json!({
            "op": "add_to_basket",
            "items": [
                {"path": path("IMG_1.JPG")},
                {"path": path("IMG_2.JPG"), "label": "接写"},
                {"path": path("IMG_3.JPG"), "groupIndex": 2},
            ]
        }),
    ));
    assert_eq!(basket["count"], 3);
    assert_eq!(basket["items"][1]["label"], "接写");

    let update = data(send(
        &mut session,
        &json!({"op": "apply_preset", "paths": [path("IMG_1.JPG")], "key": 3}),
    ));
    assert_eq!(update["updatedCount"], 1);
    assert_eq!(update["basket"]["items"][0]["label"], "内部");

    let basket = data(send(
        &mut session,
        &json!({"op": "reorder_basket", "direction": "moveDown", "index": 0}),
    ));
    assert_eq!(basket["items"][0]["displayName"], "IMG_2.JPG");

    let presets = data(send(&mut session, &json!({"op": "list_presets"})));
    assert_eq!(presets.as_array().unwrap().len(), 6);
    assert_eq!(presets[0], json!({"key": 1, "label": "全景"}));

    let rows = data(send(
        &mut session,
        &json!({"op": "generate_preview", "template": "{seq:2}_{label}_{group}{ext}"}),
    ));
    assert_eq!(rows[0]["newName"], "01_接写_1.JPG");
    assert_eq!(rows[1]["newName"], "02_内部_1.JPG");
    assert_eq!(rows[2]["newName"], "03_全景_2.JPG");

    let status = data(send(&mut session, &json!({"op": "session_state"})));
    assert_eq!(status["state"], "previewGenerated");

    let result = data(send(
        &mut session,
        &json!({"op": "execute_rename", "template": "{seq:2}_{label}_{group}{ext}"}),
    ));
    assert_eq!(result, json!({"successCount": 3, "failedCount": 0, "errors": []}));
    assert!(dir.join("03_全景_2.JPG").exists());

    let status = data(send(&mut session, &json!({"op": "session_state"})));
    assert_eq!(status["state"], "executed");
    assert_eq!(status["basketCount"], 0);
    assert_eq!(status["undoAvailable"], true);

    let result = data(send(&mut session, &json!({"op": "undo_last_rename"})));
    assert_eq!(result["successCount"], 3);
    assert!(dir.join("IMG_1.JPG").exists());

    let basket = data(send(&mut session, &json!({"op": "export_basket"})));
    assert_eq!(basket["totalCount"], 3);
    assert_eq!(basket["items"][0]["fileName"], "IMG_2.JPG");

    let again = send(&mut session, &json!({"op": "undo_last_rename"}));
    assert!(!again.ok);
    assert_eq!(again.warning.unwrap().message, "nothing to undo");
}

#[test]
fn test_import_replaces_basket() {
    let mut session = Session::new();
    data(send(
        &mut session,
        &json!({"op": "add_to_basket", "items": [{"path": "/photos/old.jpg"}]}),
    ));

    let basket = data(send(
        &mut session,
        &json!({
            "op": "import_basket",
            "snapshot": {
                "exportedAt": "2024-05-01 10:00:00",
                "totalCount": 2,
                "items": [
                    {"order": 2, "fileName": "b.jpg", "filePath": "/photos/b.jpg", "label": "詳細", "groupIndex": 4},
                    {"order": 1, "fileName": "a.jpg", "filePath": "/photos/a.jpg", "label": "外観", "groupIndex": 1}
                ]
            }
        }),
    ));
    assert_eq!(basket["count"], 2);
    assert_eq!(basket["items"][0]["path"], "/photos/a.jpg");
    assert_eq!(basket["items"][1]["groupIndex"], 4);
}

#[test]
fn test_bad_requests_do_not_change_state() {
    let mut session = Session::new();
    data(send(
        &mut session,
        &json!({"op": "add_to_basket", "items": [{"path": "/photos/a.jpg"}]}),
    ));

    for request in [
        json!({"op": "add_to_basket", "items": [{"path": "relative.jpg"}]}),
        json!({"op": "update_label", "paths": [], "label": "x"}),
        json!({"op": "update_group", "paths": ["/photos/a.jpg"], "group": 0}),
        json!({"op": "generate_preview", "template": ""}),
        json!({"op": "remove_from_basket"}),
        json!({"op": "set_directory", "path": "relative/dir"}),
    ] {
        let response = send(&mut session, &request);
        assert!(!response.ok, "{} should be rejected", request);
        assert_eq!(response.warning.unwrap().kind, "validation");
    }

    let status = data(send(&mut session, &json!({"op": "session_state"})));
    assert_eq!(status["basketCount"], 1);
    assert_eq!(status["state"], "idle");
    assert_eq!(status["directory"], Value::Null);
}
