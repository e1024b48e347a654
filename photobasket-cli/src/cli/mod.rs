pub mod args;
pub mod types;

pub use args::{BasketArgs, Cli, Commands};
pub use types::OutputFormat;
