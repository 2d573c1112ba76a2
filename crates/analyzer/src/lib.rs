//! # Rulesync Analyzer
//!
//! Infers lightweight project context from a directory tree:
//!
//! - programming languages (by file extension, bounded-depth walk)
//! - frameworks (marker files, capped import scans, manifest dependencies)
//! - test framework and package manager (per-ecosystem heuristics)
//!
//! Analysis is a pure function of the filesystem snapshot. Manifest read
//! or parse failures skip that ecosystem's contribution and never fail
//! the analysis. When several ecosystems coexist, the last-checked one
//! wins for `package_manager`/`test_framework` (known limitation).

mod context;
mod ecosystems;
mod walker;

pub use context::{analyze, ProjectContext, DEFAULT_SCAN_DEPTH};
