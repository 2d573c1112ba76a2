use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Dependency and build directories never descended into
const SKIPPED_DIRECTORIES: &[&str] = &[
    "node_modules",
    "__pycache__",
    "venv",
    "env",
    ".venv",
    "target",
    "build",
    "dist",
];

/// Collect regular files up to `max_depth` directory levels below the
/// root. Hidden entries are skipped, except `.github`; the root's own
/// name is never filtered. Unreadable entries are silently dropped.
pub(crate) fn project_files(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth + 1)
        .into_iter()
        .filter_entry(|entry| !is_skipped(entry))
        .filter_map(|result| match result {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::debug!("Skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(DirEntry::into_path)
        .collect()
}

fn is_skipped(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') && name != ".github" {
        return true;
    }
    SKIPPED_DIRECTORIES.iter().any(|skipped| name == *skipped)
}
