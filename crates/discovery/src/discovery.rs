use crate::error::{DiscoveryError, Result};
use crate::file_kind::{FileKind, INSTRUCTION_FILE_PATTERNS};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A discovered instruction file.
///
/// Identity is the path. Content is read on demand so that an unreadable
/// file affects only the operation that touches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionFile {
    pub path: PathBuf,
    pub kind: FileKind,
}

impl InstructionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = FileKind::from_path(&path);
        Self { path, kind }
    }

    /// Read the whole file content
    pub fn read(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }

    /// File name for display in messages
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Canonicalize a project path and verify it is a directory.
///
/// Both shells call this before any read, so every operation is scoped to
/// one validated filesystem path.
pub fn resolve_root(path: &Path) -> Result<PathBuf> {
    let canonical = path
        .canonicalize()
        .map_err(|_| DiscoveryError::RootNotFound(path.to_path_buf()))?;
    if !canonical.is_dir() {
        return Err(DiscoveryError::NotADirectory(canonical));
    }
    Ok(canonical)
}

/// Discover instruction files in a project.
///
/// Checks the fixed pattern list against the root and returns, in pattern
/// order, the entries that exist as regular files.
pub fn discover(root: &Path) -> Vec<InstructionFile> {
    let mut discovered = Vec::new();

    for pattern in INSTRUCTION_FILE_PATTERNS {
        let path = root.join(pattern);
        if path.is_file() {
            discovered.push(InstructionFile::new(path));
        }
    }

    log::debug!(
        "Discovered {} instruction files in {}",
        discovered.len(),
        root.display()
    );
    discovered
}

/// Check whether a path is a recognized instruction file.
///
/// Matches by file name, or by path suffix for nested patterns like
/// `.github/copilot-instructions.md`.
pub fn is_instruction_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|name| name.to_str());

    for pattern in INSTRUCTION_FILE_PATTERNS {
        let pattern_name = Path::new(pattern).file_name().and_then(|name| name.to_str());
        if name.is_some() && name == pattern_name {
            return true;
        }
        if path.to_string_lossy().ends_with(pattern) {
            return true;
        }
    }

    false
}
