//! # Rulesync Discovery
//!
//! Locates AI assistant instruction files in a project:
//!
//! - `AGENTS.md` (custom agent behaviors)
//! - `CLAUDE.md` (Claude project instructions)
//! - `.clinerules` (Cline rules)
//! - `.cursorrules` (Cursor IDE)
//! - `.github/copilot-instructions.md` (GitHub Copilot)
//!
//! Discovery checks a fixed list of relative paths against the project
//! root; there is no recursive search and no globbing.

mod discovery;
mod error;
mod file_kind;

pub use discovery::{discover, is_instruction_file, resolve_root, InstructionFile};
pub use error::{DiscoveryError, Result};
pub use file_kind::{FileKind, INSTRUCTION_FILE_PATTERNS};
