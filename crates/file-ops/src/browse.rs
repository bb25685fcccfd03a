//! Single-level folder listing for toolbar menus.

use std::path::{Path, PathBuf};

use crate::attributes::{attributes_of, is_excluded};

/// Eligible children of one folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Files, in enumeration order.
    pub files: Vec<PathBuf>,
    /// Sub-directories, in enumeration order.
    pub dirs: Vec<PathBuf>,
}

impl Listing {
    /// True if the folder has no eligible files and no eligible sub-directories.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty()
    }
}

/// Lists the immediate children of `path`, dropping Hidden and System entries.
///
/// Symbolic links and junctions are classified by their target, so a link to
/// a folder is listed as a directory. A link whose target is gone is listed
/// as a file, the way Explorer shows it. Entries whose metadata cannot be
/// read are skipped.
pub fn list_eligible(path: &Path) -> std::io::Result<Listing> {
    let mut listing = Listing::default();

    for entry in std::fs::read_dir(path)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(dir = %path.display(), "skipping unreadable entry: {e}");
                continue;
            }
        };
        let child = entry.path();

        let own = match entry.metadata() {
            Ok(md) => md,
            Err(e) => {
                tracing::debug!(path = %child.display(), "no metadata: {e}");
                continue;
            }
        };
        if is_excluded(attributes_of(&child, &own)) {
            continue;
        }

        let is_dir = std::fs::metadata(&child)
            .map(|md| md.is_dir())
            .unwrap_or(false);
        if is_dir {
            listing.dirs.push(child);
        } else {
            listing.files.push(child);
        }
    }

    Ok(listing)
}

/// Lists every immediate sub-directory of `path`, in enumeration order.
///
/// No attribute filtering: each folder under the toolbars root is a toolbar.
/// Entries that fail to enumerate are skipped; only failing to open `path`
/// itself is an error.
pub fn list_subdirectories(path: &Path) -> std::io::Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(path)?.map(|entry| entry.map(|e| e.path()));
    Ok(directories_among(path, entries))
}

fn directories_among(
    parent: &Path,
    entries: impl IntoIterator<Item = std::io::Result<PathBuf>>,
) -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    for entry in entries {
        let child = match entry {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(dir = %parent.display(), "skipping unreadable entry: {e}");
                continue;
            }
        };
        if std::fs::metadata(&child).is_ok_and(|md| md.is_dir()) {
            dirs.push(child);
        }
    }

    dirs
}
