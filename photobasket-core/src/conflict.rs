use crate::fs::Filesystem;
use crate::model::{BasketEntry, PreviewRow};
use crate::template::RenderedName;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// How file names are compared against a directory's contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseSensitivity {
    /// Probe each directory the first time it is looked at
    #[default]
    Auto,
    Sensitive,
    Insensitive,
}

/// Where one basket entry is going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTarget<'a> {
    pub entry: &'a BasketEntry,
    pub new_name: String,
    pub to: PathBuf,
}

/// Attach a destination path to every rendered name.
///
/// With a target directory every file moves there; without one each file is
/// renamed next to where it already lives.
pub fn resolve_targets<'a>(
    rendered: Vec<RenderedName<'a>>,
    target_dir: Option<&Path>,
) -> Vec<RenameTarget<'a>> {
    rendered
        .into_iter()
        .map(|r| {
            let dir = target_dir.map_or_else(|| parent_of(&r.entry.path), Path::to_path_buf);
            RenameTarget {
                entry: r.entry,
                to: dir.join(&r.name),
                new_name: r.name,
            }
        })
        .collect()
}

/// Flag every target that would collide with an existing non-batch file or
/// with another target of the same batch. Reads directories, never writes.
pub fn annotate(
    targets: &[RenameTarget<'_>],
    fs: &dyn Filesystem,
    mode: CaseSensitivity,
) -> Vec<PreviewRow> {
    let mut names = DirectoryNames::new(fs, mode);

    let sources: HashSet<(PathBuf, String)> = targets
        .iter()
        .map(|t| {
            let dir = parent_of(&t.entry.path);
            let key = names.key(&dir, &t.entry.file_name());
            (dir, key)
        })
        .collect();

    let keys: Vec<(PathBuf, String)> = targets
        .iter()
        .map(|t| {
            let dir = parent_of(&t.to);
            let key = names.key(&dir, &t.new_name);
            (dir, key)
        })
        .collect();

    let mut counts: HashMap<&(PathBuf, String), usize> = HashMap::new();
    for key in &keys {
        *counts.entry(key).or_default() += 1;
    }

    let rows: Vec<PreviewRow> = targets
        .iter()
        .zip(&keys)
        .map(|(target, key)| {
            let duplicate = counts.get(key).copied().unwrap_or_default() > 1;
            let occupied = names.listed(&key.0, &key.1) && !sources.contains(key);
            PreviewRow {
                old_name: target.entry.file_name(),
                new_name: target.new_name.clone(),
                conflict: duplicate || occupied,
                old_path: target.entry.path.clone(),
                new_path: target.to.clone(),
            }
        })
        .collect();

    tracing::debug!(
        rows = rows.len(),
        conflicts = rows.iter().filter(|r| r.conflict).count(),
        "annotated preview"
    );
    rows
}

/// Lazily listed directory contents, one listing per directory.
pub struct DirectoryNames<'fs> {
    fs: &'fs dyn Filesystem,
    mode: CaseSensitivity,
    dirs: HashMap<PathBuf, Listing>,
}

struct Listing {
    case_insensitive: bool,
    keys: HashSet<String>,
}

impl<'fs> DirectoryNames<'fs> {
    pub fn new(fs: &'fs dyn Filesystem, mode: CaseSensitivity) -> Self {
        Self {
            fs,
            mode,
            dirs: HashMap::new(),
        }
    }

    fn listing(&mut self, dir: &Path) -> &Listing {
        let fs = self.fs;
        let mode = self.mode;
        self.dirs
            .entry(dir.to_path_buf())
            .or_insert_with(|| load_listing(fs, mode, dir))
    }

    pub fn is_case_insensitive(&mut self, dir: &Path) -> bool {
        self.listing(dir).case_insensitive
    }

    /// The comparison key for `name` inside `dir`.
    pub fn key(&mut self, dir: &Path, name: &str) -> String {
        fold_case(name, self.is_case_insensitive(dir))
    }

    /// Whether `key` was present when `dir` was first listed.
    fn listed(&mut self, dir: &Path, key: &str) -> bool {
        self.listing(dir).keys.contains(key)
    }
}

fn load_listing(fs: &dyn Filesystem, mode: CaseSensitivity, dir: &Path) -> Listing {
    let names = fs.list_dir(dir).unwrap_or_else(|err| {
        tracing::debug!(dir = %dir.display(), error = %err, "cannot list directory, treating as empty");
        Vec::new()
    });
    let case_insensitive = match mode {
        CaseSensitivity::Sensitive => false,
        CaseSensitivity::Insensitive => true,
        CaseSensitivity::Auto => probe_case_insensitive(fs, dir, &names),
    };
    Listing {
        case_insensitive,
        keys: names.iter().map(|n| fold_case(n, case_insensitive)).collect(),
    }
}

/// Detect a case-insensitive directory without creating anything in it.
///
/// Looks an existing name up again with its case flipped; if that resolves to
/// something that is not itself listed, the directory ignores case.
pub fn probe_case_insensitive(fs: &dyn Filesystem, dir: &Path, names: &[String]) -> bool {
    for name in names {
        let flipped = flip_case(name);
        if flipped == *name || names.contains(&flipped) {
            continue;
        }
        return fs.exists(&dir.join(&flipped));
    }
    false
}

/// True when `from` and `to` differ only by letter case.
pub(crate) fn is_case_only_change(from: &Path, to: &Path) -> bool {
    from != to && from.to_string_lossy().to_lowercase() == to.to_string_lossy().to_lowercase()
}

pub(crate) fn parent_of(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

fn fold_case(name: &str, case_insensitive: bool) -> String {
    if case_insensitive {
        name.to_lowercase()
    } else {
        name.to_string()
    }
}

fn flip_case(name: &str) -> String {
    name.chars()
        .flat_map(|c| {
            if c.is_lowercase() {
                c.to_uppercase().collect::<Vec<_>>()
            } else {
                c.to_lowercase().collect::<Vec<_>>()
            }
        })
        .collect()
}
