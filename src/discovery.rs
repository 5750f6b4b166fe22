use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::Result;

/// Collect regular files under `root` whose extension is one of `extensions`.
///
/// With `recursive` unset only the immediate children of `root` are
/// considered. Extensions are matched without the leading dot, so both
/// `"tsx"` and `".tsx"` are accepted. Symlinks are followed and dot-prefixed
/// files and directories below `root` are skipped. Results are sorted by path.
pub fn discover(root: &Path, extensions: &[String], recursive: bool) -> Result<Vec<PathBuf>> {
    let wanted: Vec<&str> = extensions
        .iter()
        .map(|ext| ext.trim_start_matches('.'))
        .collect();

    let mut walker = WalkDir::new(root).follow_links(true).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if has_extension(entry.path(), &wanted) {
            files.push(entry.into_path());
        }
    }
    files.sort();

    debug!(root = %root.display(), count = files.len(), "Discovered files");
    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn has_extension(path: &Path, wanted: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| wanted.contains(&ext))
        .unwrap_or(false)
}
