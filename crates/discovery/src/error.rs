use std::path::PathBuf;
use thiserror::Error;

/// Result type for discovery operations
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Errors that can occur while resolving a project root
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Project path does not exist or cannot be canonicalized
    #[error("Project path does not exist: {0}")]
    RootNotFound(PathBuf),

    /// Project path exists but is not a directory
    #[error("Project path is not a directory: {0}")]
    NotADirectory(PathBuf),
}
