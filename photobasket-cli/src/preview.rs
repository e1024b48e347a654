use crate::cli::OutputFormat;
use anyhow::Result;
use photobasket_core::{OutputFormatter, PreviewResult, Session};

pub fn handle_preview(
    session: &mut Session,
    template: Option<&str>,
    output: OutputFormat,
    use_color: bool,
) -> Result<()> {
    let result = PreviewResult::new(session.generate_preview(template)?);
    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => print!("{}", result.render_summary(use_color)),
    }
    Ok(())
}
