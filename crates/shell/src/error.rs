//! Shell error types.

use std::path::PathBuf;

/// Errors produced by shell queries and launches.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to open {}: {source}", path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
