//! Filesystem access for toolbar folders.
//!
//! Lists the immediate children of a folder, split into files and
//! sub-directories, with Hidden and System entries removed. Order is the
//! order the OS enumerates in; nothing here sorts.

mod attributes;
mod browse;

#[cfg(all(test, windows))]
mod testing;

use std::path::{Path, PathBuf};

pub use attributes::{FILE_ATTRIBUTE_HIDDEN, FILE_ATTRIBUTE_SYSTEM, attributes_of, is_excluded};
pub use browse::{Listing, list_eligible, list_subdirectories};

/// Name of the folder inside the user profile that holds the toolbars.
pub const TOOLBARS_DIR: &str = "Toolbars";

/// Returns `<profile>/Toolbars`.
pub fn toolbars_path(user_profile: &Path) -> PathBuf {
    user_profile.join(TOOLBARS_DIR)
}
