//! Basket-editing requests. Every response carries the current basket.

use super::Response;
use crate::basket::MoveDirection;
use crate::error::Result;
use crate::export::ExportSnapshot;
use crate::model::BasketItem;
use crate::output::{BasketView, LabelUpdate};
use crate::session::Session;
use std::path::{Path, PathBuf};

pub fn view(session: &Session) -> BasketView {
    BasketView::from(session.basket())
}

pub fn label_update(session: &Session, updated_count: usize) -> LabelUpdate {
    LabelUpdate {
        basket: view(session),
        updated_count,
    }
}

fn with_basket(session: &Session, result: Result<()>) -> Response {
    match result {
        Ok(()) => Response::success(view(session)),
        Err(err) => {
            tracing::warn!(kind = err.kind(), error = %err, "basket request not applied");
            Response::warning(&err).with_data(view(session))
        },
    }
}

fn with_label_update(session: &Session, result: Result<usize>) -> Response {
    match result {
        Ok(updated) => Response::success(label_update(session, updated)),
        Err(err) => {
            tracing::warn!(kind = err.kind(), error = %err, "label request not applied");
            Response::warning(&err).with_data(label_update(session, 0))
        },
    }
}

pub fn add(session: &mut Session, items: Vec<BasketItem>) -> Response {
    let result = session.add_to_basket(items).map(|_| ());
    with_basket(session, result)
}

pub fn remove(session: &mut Session, path: &Path) -> Response {
    let result = session.remove_from_basket(path);
    with_basket(session, result)
}

pub fn reorder(session: &mut Session, direction: MoveDirection, index: usize) -> Response {
    let result = session.reorder_basket(direction, index);
    with_basket(session, result)
}

pub fn clear(session: &mut Session) -> Response {
    session.clear_basket();
    with_basket(session, Ok(()))
}

pub fn update_label(session: &mut Session, paths: &[PathBuf], label: &str) -> Response {
    let updated = session.update_label(paths, label);
    with_label_update(session, Ok(updated))
}

pub fn apply_preset(session: &mut Session, paths: &[PathBuf], key: u8) -> Response {
    let result = session.apply_preset(paths, key);
    with_label_update(session, result)
}

pub fn update_group(session: &mut Session, paths: &[PathBuf], group: u32) -> Response {
    let result = session.update_group(paths, group);
    with_label_update(session, result)
}

pub fn export(session: &Session) -> Response {
    match session.export_basket() {
        Ok(snapshot) => Response::success(snapshot),
        Err(err) => {
            tracing::warn!(kind = err.kind(), error = %err, "export skipped");
            Response::warning(&err)
        },
    }
}

pub fn import(session: &mut Session, snapshot: &ExportSnapshot) -> Response {
    let imported = session.import_basket(snapshot);
    tracing::debug!(imported, "imported basket snapshot");
    with_basket(session, Ok(()))
}
