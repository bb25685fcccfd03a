//! OS shell access for the toolbar tray.
//!
//! Two narrow seams separate the menu model from the operating system:
//! - [`ShellMetadataProvider`]: display name and icon of a path, as the
//!   shell would render it
//! - [`FileLauncher`]: the shell's default "open" action on a path
//!
//! [`SystemShell`] implements both. On Windows it talks to `shell32`
//! directly; elsewhere it falls back to the file stem (no icon) and the
//! `open` crate, which keeps the rest of the workspace testable off Windows.

mod error;
mod icon;

#[cfg(not(windows))]
mod fallback;
#[cfg(windows)]
mod windows;

use std::path::Path;

pub use error::ShellError;
pub use icon::IconImage;

/// What the shell reports about a single path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellItem {
    /// Label shown in menus.
    pub display_name: String,
    /// Small icon, if the shell produced one.
    pub icon: Option<IconImage>,
}

/// Source of display names and icons for filesystem paths.
pub trait ShellMetadataProvider {
    /// Describes `path`.
    ///
    /// Fails with [`ShellError::NotFound`] if the path does not exist at
    /// call time.
    fn describe(&self, path: &Path) -> Result<ShellItem, ShellError>;
}

/// Invokes the OS default handler for a path.
pub trait FileLauncher {
    /// Opens `path` (runs executables, opens documents and folders).
    fn launch(&self, path: &Path) -> Result<(), ShellError>;
}

/// The real operating-system shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

impl ShellMetadataProvider for SystemShell {
    fn describe(&self, path: &Path) -> Result<ShellItem, ShellError> {
        if !path.exists() {
            return Err(ShellError::NotFound(path.to_path_buf()));
        }

        #[cfg(windows)]
        let icon = windows::small_icon(path);
        #[cfg(not(windows))]
        let icon = fallback::small_icon(path);

        Ok(ShellItem {
            display_name: display_name(path),
            icon,
        })
    }
}

impl FileLauncher for SystemShell {
    fn launch(&self, path: &Path) -> Result<(), ShellError> {
        tracing::info!(path = %path.display(), "opening");

        #[cfg(windows)]
        let result = windows::shell_open(path);
        #[cfg(not(windows))]
        let result = fallback::shell_open(path);

        result.map_err(|source| ShellError::Launch {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns the menu label for `path`: the file name without its extension.
///
/// Names made only of an extension (`.profile`) and paths without a file
/// name (drive roots) fall back to the full name or the path itself.
pub fn display_name(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
