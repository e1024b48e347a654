//! Preview, execute and undo requests.

use super::{Response, Warning};
use crate::apply::RenameResult;
use crate::session::Session;
use pluralizer::pluralize;

pub fn preview(session: &mut Session, template: Option<&str>) -> Response {
    match session.generate_preview(template) {
        Ok(rows) => Response::success(rows),
        Err(err) => {
            tracing::warn!(kind = err.kind(), error = %err, "preview not generated");
            Response::warning(&err)
        },
    }
}

pub fn execute(session: &mut Session, template: Option<&str>) -> Response {
    match session.execute_rename(template) {
        Ok(result) => with_failures(result),
        Err(err) => {
            tracing::warn!(kind = err.kind(), error = %err, "rename not executed");
            Response::warning(&err)
        },
    }
}

pub fn undo(session: &mut Session) -> Response {
    match session.undo_last_rename() {
        Ok(result) => with_failures(result),
        Err(err) => {
            tracing::warn!(kind = err.kind(), error = %err, "undo not performed");
            Response::warning(&err)
        },
    }
}

/// A batch always succeeds as a whole; per-file failures ride along as an io warning.
fn with_failures(result: RenameResult) -> Response {
    let failed = result.failed_count;
    let mut response = Response::success(&result);
    if failed > 0 {
        response.warning = Some(Warning {
            kind: "io".to_string(),
            message: format!(
                "{} could not be renamed",
                pluralize("file", isize::try_from(failed).unwrap_or(isize::MAX), true)
            ),
        });
    }
    response
}
