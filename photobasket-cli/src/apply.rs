use crate::cli::OutputFormat;
use anyhow::Result;
use photobasket_core::{OutputFormatter, Session};

/// Rename the basket. Returns `false` when at least one photo was not renamed.
pub fn handle_apply(
    session: &mut Session,
    template: Option<&str>,
    output: OutputFormat,
    use_color: bool,
) -> Result<bool> {
    let result = session.execute_rename(template)?;
    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => print!("{}", result.render_summary("Renamed", use_color)),
    }
    Ok(result.failed_count == 0)
}
