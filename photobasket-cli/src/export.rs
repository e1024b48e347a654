use crate::cli::OutputFormat;
use anyhow::Result;
use photobasket_core::{OutputFormatter, Session};

pub fn handle_export(session: &Session, output: OutputFormat) -> Result<()> {
    let snapshot = session.export_basket()?;
    let formatted = snapshot.format(output.into());
    if formatted.ends_with('\n') {
        print!("{formatted}");
    } else {
        println!("{formatted}");
    }
    Ok(())
}
