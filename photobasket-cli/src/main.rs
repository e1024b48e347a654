use anyhow::Result;
use clap::{CommandFactory, Parser};
use photobasket_core::{should_use_color, BasketError, Config};
use std::io;
use std::path::Path;
use std::process;

mod apply;
mod basket;
mod cli;
mod export;
mod logging;
mod presets;
mod preview;
mod session;
mod settings;
mod signals;

use cli::{Cli, Commands};
use signals::{Interrupt, INTERRUPTED_EXIT_CODE};

fn main() {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    // Completions need neither config nor signal handling
    if let Commands::Completions { shell, dir } = &cli.command {
        let mut cmd = Cli::command();
        let result = match dir {
            Some(dir) => generate_completions(*shell, &mut cmd, "photobasket", dir),
            None => {
                clap_complete::generate(*shell, &mut cmd, "photobasket", &mut io::stdout());
                Ok(())
            },
        };
        finish(result.map(|()| 0));
    }

    let interrupt = Interrupt::install().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        process::exit(3);
    });

    let config = settings::load_config(cli.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        process::exit(2);
    });

    let use_color = should_use_color(if cli.no_color {
        Some(false)
    } else {
        config.defaults.use_color
    });

    let result = run(cli.command, &config, use_color, &interrupt);

    if interrupt.was_interrupted() {
        eprintln!("Operation interrupted");
        process::exit(INTERRUPTED_EXIT_CODE);
    }

    finish(result);
}

fn run(command: Commands, config: &Config, use_color: bool, interrupt: &Interrupt) -> Result<i32> {
    match command {
        Commands::Presets { output } => presets::handle_presets(config, output).map(|()| 0),

        Commands::Preview {
            template,
            basket,
            dir,
            output,
        } => {
            let mut session = basket::build_session(config, &basket, dir.as_deref())?;
            preview::handle_preview(&mut session, template.as_deref(), output, use_color)
                .map(|()| 0)
        },

        Commands::Apply {
            template,
            basket,
            dir,
            output,
        } => {
            let mut session = basket::build_session(config, &basket, dir.as_deref())?;
            let all_renamed =
                apply::handle_apply(&mut session, template.as_deref(), output, use_color)?;
            Ok(if all_renamed { 0 } else { 1 })
        },

        Commands::Export { basket, output } => {
            let session = basket::build_session(config, &basket, None)?;
            export::handle_export(&session, output).map(|()| 0)
        },

        Commands::Session => session::handle_session(config, interrupt).map(|()| 0),

        Commands::Completions { .. } => Ok(0),
    }
}

fn finish(result: Result<i32>) -> ! {
    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(exit_code(&e));
        },
    }
}

/// 2 for bad input, 3 for failures of the machine underneath.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<BasketError>() {
        Some(BasketError::Io { .. }) => 3,
        Some(_) => 2,
        None => {
            let not_found = err.chain().any(|cause| {
                cause
                    .downcast_ref::<io::Error>()
                    .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
            });
            if not_found {
                2
            } else {
                3
            }
        },
    }
}

// Generate shell completions
pub fn generate_completions<G: clap_complete::Generator>(
    gen: G,
    cmd: &mut clap::Command,
    name: &str,
    out_dir: &Path,
) -> Result<()> {
    use clap_complete::generate_to;
    use std::fs;

    fs::create_dir_all(out_dir)?;
    let path = generate_to(gen, cmd, name, out_dir)?;
    println!("Generated completion file: {}", path.display());
    Ok(())
}
