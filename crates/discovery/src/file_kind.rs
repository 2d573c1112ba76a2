use serde::{Deserialize, Serialize};
use std::path::Path;

/// Relative paths checked during discovery, in discovery order.
/// Names are case-sensitive.
pub const INSTRUCTION_FILE_PATTERNS: &[&str] = &[
    "AGENTS.md",
    "CLAUDE.md",
    ".clinerules",
    ".cursorrules",
    ".github/copilot-instructions.md",
];

/// Kind of instruction file, keyed by file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Agents,
    Claude,
    Copilot,
    Cursor,
    Unknown,
}

impl FileKind {
    /// Classify a path by its file name.
    ///
    /// `.clinerules` files classify as `Claude`.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let name = path
            .as_ref()
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match name.as_str() {
            "agents.md" => FileKind::Agents,
            "claude.md" | ".clinerules" => FileKind::Claude,
            "copilot-instructions.md" => FileKind::Copilot,
            ".cursorrules" => FileKind::Cursor,
            _ => FileKind::Unknown,
        }
    }

    /// Get kind name as string
    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Agents => "agents",
            FileKind::Claude => "claude",
            FileKind::Copilot => "copilot",
            FileKind::Cursor => "cursor",
            FileKind::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(FileKind::from_path("AGENTS.md"), FileKind::Agents);
        assert_eq!(FileKind::from_path("CLAUDE.md"), FileKind::Claude);
        assert_eq!(FileKind::from_path(".clinerules"), FileKind::Claude);
        assert_eq!(FileKind::from_path(".cursorrules"), FileKind::Cursor);
        assert_eq!(
            FileKind::from_path(".github/copilot-instructions.md"),
            FileKind::Copilot
        );
        assert_eq!(FileKind::from_path("unknown.md"), FileKind::Unknown);
    }

    #[test]
    fn test_as_str() {
        assert_eq!(FileKind::Agents.as_str(), "agents");
        assert_eq!(FileKind::Claude.as_str(), "claude");
        assert_eq!(FileKind::Copilot.as_str(), "copilot");
        assert_eq!(FileKind::Cursor.as_str(), "cursor");
        assert_eq!(FileKind::Unknown.as_str(), "unknown");
    }
}
