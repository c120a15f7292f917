// File discovery under a scan root

use std::path::Path;

use glob::Pattern;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, ScanError};

/// Directory and file names skipped unless the caller overrides excludes
pub const DEFAULT_EXCLUDES: &[&str] = &["node_modules", ".git", "target"];

/// Relative paths (`/`-separated, sorted) of every file under `root`
/// matching at least one of `patterns`.
///
/// A pattern matches when it matches either the relative path or the bare
/// file name, so `*.py` finds Python files at any depth. An empty pattern
/// list matches every file. Excludes prune whole directories.
pub fn discover_files(
    root: &Path,
    patterns: &[String],
    excludes: &[String],
) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(ScanError::DirectoryNotFound(root.to_path_buf()));
    }
    // Surface permission problems on the root itself instead of an empty scan
    std::fs::read_dir(root).map_err(|source| ScanError::ReadFailure {
        path: root.to_path_buf(),
        source,
    })?;

    let include = compile_patterns(patterns)?;
    let exclude = compile_patterns(excludes)?;

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry, root, &exclude));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = relative_path(entry.path(), root);
        let file_name = entry.file_name().to_string_lossy();
        if include.is_empty() || matches_any(&include, &relative, &file_name) {
            files.push(relative);
        }
    }

    files.sort();
    debug!("Discovered {} files under {}", files.len(), root.display());
    Ok(files)
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| {
                ScanError::InvalidArgument(format!("invalid glob pattern '{}': {}", p, e))
            })
        })
        .collect()
}

fn matches_any(patterns: &[Pattern], relative: &str, file_name: &str) -> bool {
    patterns
        .iter()
        .any(|p| p.matches(relative) || p.matches(file_name))
}

fn is_excluded(entry: &DirEntry, root: &Path, exclude: &[Pattern]) -> bool {
    let name = entry.file_name().to_string_lossy();
    let relative = relative_path(entry.path(), root);
    exclude
        .iter()
        .any(|p| p.as_str() == name || p.matches(&relative) || p.matches(&name))
}

fn relative_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
