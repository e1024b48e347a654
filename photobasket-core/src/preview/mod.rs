mod table;

pub use table::render_table;

use nu_ansi_term::{Color as AnsiColor, Style};
use std::io::{self, IsTerminal};

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color,
        None => std::env::var_os("NO_COLOR").is_none() && is_terminal(),
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

/// One line per failed item, marked with a red cross when colour is on.
pub fn render_errors(errors: &[String], use_color: bool) -> String {
    let marker = if use_color {
        Style::new().fg(AnsiColor::Red).bold().paint("✗").to_string()
    } else {
        "✗".to_string()
    };

    errors
        .iter()
        .map(|error| {
            if use_color {
                format!("{} {}\n", marker, AnsiColor::Red.paint(error.as_str()))
            } else {
                format!("{} {}\n", marker, error)
            }
        })
        .collect()
}
