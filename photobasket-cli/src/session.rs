use crate::signals::Interrupt;
use anyhow::{Context, Result};
use photobasket_core::{handle_line, Config, Session};
use std::io::{self, BufRead, Write};

/// Answer one JSON request per input line until stdin closes.
///
/// A signal that arrives mid-request is honoured only after the response
/// has been written.
pub fn handle_session(config: &Config, interrupt: &Interrupt) -> Result<()> {
    let mut session = Session::from_config(config)?;
    tracing::info!("session started");
    serve(&mut session, io::stdin().lock(), &mut io::stdout().lock(), interrupt)
}

fn serve<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    output: &mut W,
    interrupt: &Interrupt,
) -> Result<()> {
    interrupt.set_idle(true);
    for line in input.lines() {
        let line = line.context("Failed to read request")?;
        if line.trim().is_empty() {
            continue;
        }

        interrupt.set_idle(false);
        let response = handle_line(session, &line);
        writeln!(output, "{}", response.to_json_line()).context("Failed to write response")?;
        output.flush().context("Failed to write response")?;

        if interrupt.was_interrupted() {
            tracing::info!("session interrupted");
            return Ok(());
        }
        interrupt.set_idle(true);
    }
    interrupt.set_idle(false);
    tracing::info!("session closed");
    Ok(())
}
