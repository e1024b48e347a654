use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::types::OutputFormat;

/// Collect photos into an ordered basket, label them and batch-rename them from a template
#[derive(Parser, Debug)]
#[command(name = "photobasket")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Read configuration from this file instead of the usual locations
    #[arg(long, global = true, env = "PHOTOBASKET_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log debug events to stderr (PHOTOBASKET_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// How the one-shot commands fill their basket
#[derive(Args, Debug, Clone)]
pub struct BasketArgs {
    /// Photos to put in the basket, in order
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Label for every photo (defaults to the configured label)
    #[arg(long)]
    pub label: Option<String>,

    /// Group index for every photo (defaults to the configured group)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub group: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the label presets bound to keys 1-9
    Presets {
        /// Output format
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Show the names a rename would produce, without touching any file
    Preview {
        /// File name template, e.g. "V-{group}_{label}_{seq:003}"
        #[arg(short, long)]
        template: Option<String>,

        #[command(flatten)]
        basket: BasketArgs,

        /// Rename into this directory instead of each photo's own
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Rename the photos. Existing files are never overwritten
    Apply {
        /// File name template, e.g. "V-{group}_{label}_{seq:003}"
        #[arg(short, long)]
        template: Option<String>,

        #[command(flatten)]
        basket: BasketArgs,

        /// Rename into this directory instead of each photo's own
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Print a snapshot of the basket
    Export {
        #[command(flatten)]
        basket: BasketArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Serve JSON-lines requests on stdin, one response per line on stdout
    Session,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,

        /// Write the completion file into this directory instead of stdout
        #[arg(long, value_name = "OUT")]
        dir: Option<PathBuf>,
    },
}
