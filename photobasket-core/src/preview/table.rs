use crate::model::PreviewRow;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::io::{self, IsTerminal};

/// Render preview rows as a table: position, old name, new name, conflict.
pub fn render_table(rows: &[PreviewRow], use_color: bool) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Old name").fg(Color::Cyan),
            Cell::new("New name").fg(Color::Cyan),
            Cell::new("Conflict").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["#", "Old name", "New name", "Conflict"]);
    }

    for (index, row) in rows.iter().enumerate() {
        let position = (index + 1).to_string();
        let conflict = if row.conflict { "yes" } else { "" };

        if use_color {
            let new_name = if row.conflict {
                Cell::new(&row.new_name).fg(Color::Red)
            } else {
                Cell::new(&row.new_name).fg(Color::Green)
            };
            table.add_row(vec![
                Cell::new(position).fg(Color::DarkGrey),
                Cell::new(&row.old_name),
                new_name,
                Cell::new(conflict).fg(Color::Red),
            ]);
        } else {
            table.add_row(vec![
                position.as_str(),
                row.old_name.as_str(),
                row.new_name.as_str(),
                conflict,
            ]);
        }
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn row(old: &str, new: &str, conflict: bool) -> PreviewRow {
        PreviewRow {
            old_name: old.to_string(),
            new_name: new.to_string(),
            conflict,
            old_path: PathBuf::from("/p").join(old),
            new_path: PathBuf::from("/p").join(new),
        }
    }

    #[test]
    fn test_table_lists_rows_in_order() {
        let output = render_table(
            &[row("a.jpg", "1_全景.jpg", false), row("b.jpg", "2_全景.jpg", true)],
            false,
        );
        assert!(output.contains("Old name"));
        assert!(output.contains("Conflict"));
        let first = output.find("a.jpg").unwrap();
        let second = output.find("b.jpg").unwrap();
        assert!(first < second);
        assert!(output.contains("yes"));
    }

    #[test]
    fn test_plain_table_has_no_escape_codes() {
        let output = render_table(&[row("a.jpg", "x.jpg", true)], false);
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_colored_table_has_escape_codes() {
        let output = render_table(&[row("a.jpg", "x.jpg", true)], true);
        assert!(output.contains('\u{1b}'));
    }
}
