//! The request/response boundary hosts talk to.
//!
//! A request is validated here before any engine code runs, and every
//! request produces a [`Response`]: no failure escapes as an error.

pub mod basket;
pub mod rename;

use crate::basket::MoveDirection;
use crate::error::{BasketError, Result};
use crate::export::ExportSnapshot;
use crate::model::BasketItem;
use crate::session::Session;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use ts_rs::TS;

/// One call into the engine, tagged by `op`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "op", rename_all = "snake_case")]
#[ts(export)]
pub enum Request {
    AddToBasket {
        items: Vec<BasketItem>,
    },
    RemoveFromBasket {
        #[ts(type = "string")]
        path: PathBuf,
    },
    ReorderBasket {
        direction: MoveDirection,
        index: usize,
    },
    ClearBasket,
    UpdateLabel {
        #[ts(type = "Array<string>")]
        paths: Vec<PathBuf>,
        label: String,
    },
    ApplyPreset {
        #[ts(type = "Array<string>")]
        paths: Vec<PathBuf>,
        key: u8,
    },
    UpdateGroup {
        #[ts(type = "Array<string>")]
        paths: Vec<PathBuf>,
        group: u32,
    },
    ListPresets,
    GeneratePreview {
        #[serde(default)]
        #[ts(optional)]
        template: Option<String>,
    },
    ExecuteRename {
        #[serde(default)]
        #[ts(optional)]
        template: Option<String>,
    },
    UndoLastRename,
    ExportBasket,
    ImportBasket {
        snapshot: ExportSnapshot,
    },
    SetDirectory {
        #[serde(default)]
        #[ts(type = "string | null")]
        path: Option<PathBuf>,
    },
    SessionState,
}

impl Request {
    /// Checks that need more than the shape of the JSON.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::AddToBasket { items } => {
                if items.is_empty() {
                    return Err(BasketError::validation("no items selected"));
                }
                items.iter().try_for_each(|item| require_absolute(&item.path))
            },
            Self::RemoveFromBasket { path } => require_absolute(path),
            Self::UpdateLabel { paths, .. }
            | Self::ApplyPreset { paths, .. }
            | Self::UpdateGroup { paths, .. } => {
                if paths.is_empty() {
                    return Err(BasketError::validation("no items selected"));
                }
                Ok(())
            },
            Self::GeneratePreview { template } | Self::ExecuteRename { template } => {
                match template {
                    Some(template) if template.trim().is_empty() => {
                        Err(BasketError::validation("template is empty"))
                    },
                    _ => Ok(()),
                }
            },
            Self::ImportBasket { snapshot } => {
                if snapshot.items.is_empty() {
                    return Err(BasketError::validation("snapshot has no items"));
                }
                snapshot
                    .items
                    .iter()
                    .try_for_each(|item| require_absolute(&item.file_path))
            },
            Self::SetDirectory { path: Some(path) } => require_absolute(path),
            _ => Ok(()),
        }
    }

    /// Whether this operation answers with the basket.
    fn returns_basket(&self) -> bool {
        matches!(
            self,
            Self::AddToBasket { .. }
                | Self::RemoveFromBasket { .. }
                | Self::ReorderBasket { .. }
                | Self::ClearBasket
                | Self::ImportBasket { .. }
        )
    }

    fn returns_label_update(&self) -> bool {
        matches!(
            self,
            Self::UpdateLabel { .. } | Self::ApplyPreset { .. } | Self::UpdateGroup { .. }
        )
    }
}

fn require_absolute(path: &Path) -> Result<()> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(BasketError::validation(format!(
            "path must be absolute: {}",
            path.display()
        )))
    }
}

/// A non-fatal problem reported alongside (or instead of) data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Warning {
    pub kind: String,
    pub message: String,
}

impl From<&BasketError> for Warning {
    fn from(err: &BasketError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Response {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "unknown")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub warning: Option<Warning>,
}

impl Response {
    pub fn success(data: impl Serialize) -> Self {
        Self {
            ok: true,
            data: serde_json::to_value(data).ok(),
            warning: None,
        }
    }

    pub fn warning(err: &BasketError) -> Self {
        Self {
            ok: false,
            data: None,
            warning: Some(Warning::from(err)),
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: impl Serialize) -> Self {
        self.data = serde_json::to_value(data).ok();
        self
    }

    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"ok":false,"warning":{"kind":"validation","message":"unserialisable response"}}"#
                .to_string()
        })
    }
}

/// Run one request against the session.
pub fn dispatch(session: &mut Session, request: Request) -> Response {
    if let Err(err) = request.validate() {
        tracing::warn!(kind = err.kind(), error = %err, "rejected request");
        return rejected(session, &request, &err);
    }

    match request {
        Request::AddToBasket { items } => basket::add(session, items),
        Request::RemoveFromBasket { path } => basket::remove(session, &path),
        Request::ReorderBasket { direction, index } => basket::reorder(session, direction, index),
        Request::ClearBasket => basket::clear(session),
        Request::UpdateLabel { paths, label } => basket::update_label(session, &paths, &label),
        Request::ApplyPreset { paths, key } => basket::apply_preset(session, &paths, key),
        Request::UpdateGroup { paths, group } => basket::update_group(session, &paths, group),
        Request::ListPresets => Response::success(session.list_presets()),
        Request::GeneratePreview { template } => rename::preview(session, template.as_deref()),
        Request::ExecuteRename { template } => rename::execute(session, template.as_deref()),
        Request::UndoLastRename => rename::undo(session),
        Request::ExportBasket => basket::export(session),
        Request::ImportBasket { snapshot } => basket::import(session, &snapshot),
        Request::SetDirectory { path } => {
            session.set_directory(path);
            Response::success(session.status())
        },
        Request::SessionState => Response::success(session.status()),
    }
}

/// Parse one JSON request and run it. Malformed input becomes a warning.
pub fn handle_line(session: &mut Session, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => dispatch(session, request),
        Err(err) => {
            let err = BasketError::validation(format!("invalid request: {}", err));
            tracing::warn!(error = %err, "could not parse request");
            Response::warning(&err)
        },
    }
}

fn rejected(session: &Session, request: &Request, err: &BasketError) -> Response {
    let response = Response::warning(err);
    if request.returns_basket() {
        response.with_data(basket::view(session))
    } else if request.returns_label_update() {
        response.with_data(basket::label_update(session, 0))
    } else {
        response
    }
}
