#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod apply;
pub mod basket;
pub mod config;
pub mod conflict;
pub mod error;
pub mod export;
pub mod filename;
pub mod fs;
pub mod history;
pub mod model;
pub mod operations;
pub mod output;
pub mod presets;
pub mod preview;
pub mod session;
pub mod template;
pub mod undo;

pub use apply::{BatchOutcome, RenameExecutor, RenameResult};
pub use basket::{Basket, MoveDirection};
pub use config::{Config, DefaultsConfig};
pub use conflict::{annotate, resolve_targets, CaseSensitivity, RenameTarget};
pub use error::{BasketError, Result};
pub use export::{export, ExportItem, ExportSnapshot};
#[cfg(any(test, feature = "test-util"))]
pub use fs::FaultyFilesystem;
pub use fs::{Filesystem, StdFilesystem};
pub use history::{RenameBatch, RenamePair, UndoLog};
pub use model::{BasketEntry, BasketItem, Image, PreviewRow};
pub use operations::{dispatch, handle_line, Request, Response, Warning};
pub use output::{
    BasketView, LabelUpdate, OutputFormat, OutputFormatter, PresetList, PreviewResult,
};
pub use presets::{LabelPreset, PresetRegistry};
pub use preview::{render_errors, render_table, should_use_color};
pub use session::{Session, SessionStatus, WorkflowState};
pub use template::{render, RenderOptions, RenderedName, Template, DEFAULT_TEMPLATE};
pub use undo::UndoOutcome;
