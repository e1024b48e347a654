use crate::cli::OutputFormat;
use anyhow::Result;
use photobasket_core::{Config, OutputFormatter, PresetList};

pub fn handle_presets(config: &Config, output: OutputFormat) -> Result<()> {
    let list = PresetList {
        presets: config.preset_registry()?.enumerate(),
    };
    match output {
        OutputFormat::Json => println!("{}", list.format_json()),
        OutputFormat::Summary => print!("{}", list.format_summary()),
    }
    Ok(())
}
