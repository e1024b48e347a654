use crate::cli::BasketArgs;
use anyhow::{Context, Result};
use photobasket_core::{BasketItem, Config, Session};
use std::fs;
use std::path::Path;

/// A fresh session whose basket holds `args.files` in command-line order.
pub fn build_session(config: &Config, args: &BasketArgs, dir: Option<&Path>) -> Result<Session> {
    let mut session = Session::from_config(config)?;

    if let Some(dir) = dir {
        let dir = std::path::absolute(dir)
            .with_context(|| format!("Failed to resolve directory: {}", dir.display()))?;
        session.set_directory(Some(dir));
    }

    let items = args
        .files
        .iter()
        .map(|file| {
            let path = fs::canonicalize(file)
                .with_context(|| format!("Failed to resolve file: {}", file.display()))?;
            Ok(BasketItem {
                label: args.label.clone(),
                group_index: args.group,
                ..BasketItem::from_path(path)
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let added = session.add_to_basket(items)?;
    tracing::debug!(added, "basket built from command line");
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(files: Vec<std::path::PathBuf>) -> BasketArgs {
        BasketArgs {
            files,
            label: Some("接写".to_string()),
            group: Some(3),
        }
    }

    #[test]
    fn test_files_become_absolute_entries() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.jpg");
        let b = temp_dir.path().join("b.jpg");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        let session = build_session(&Config::default(), &args(vec![b, a]), None).unwrap();
        let entries = session.basket().entries();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.path.is_absolute()));
        assert_eq!(entries[0].display_name, "b.jpg");
        assert_eq!(entries[1].label, "接写");
        assert_eq!(entries[1].group_index, 3);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.jpg");
        let err = build_session(&Config::default(), &args(vec![missing]), None).err().expect("expected build_session to fail");
        assert!(err.to_string().contains("missing.jpg"));
    }
}
