//! Hidden/System attribute checks.

use std::fs::Metadata;
use std::path::Path;

/// Win32 `FILE_ATTRIBUTE_HIDDEN`.
pub const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
/// Win32 `FILE_ATTRIBUTE_SYSTEM`.
pub const FILE_ATTRIBUTE_SYSTEM: u32 = 0x4;

/// Returns true if an entry with these attribute bits must not appear in a menu.
///
/// Only Hidden and System matter; every other bit (read-only, archive,
/// reparse point, ...) is ignored.
pub fn is_excluded(attributes: u32) -> bool {
    attributes & (FILE_ATTRIBUTE_HIDDEN | FILE_ATTRIBUTE_SYSTEM) != 0
}

/// Reads the Win32 attribute bits of an entry.
///
/// Platforms without file attributes report a leading `.` as Hidden, the
/// convention their shells use for the same purpose.
#[cfg(windows)]
pub fn attributes_of(_path: &Path, metadata: &Metadata) -> u32 {
    use std::os::windows::fs::MetadataExt;
    metadata.file_attributes()
}

/// Reads the Win32 attribute bits of an entry.
///
/// Platforms without file attributes report a leading `.` as Hidden, the
/// convention their shells use for the same purpose.
#[cfg(not(windows))]
pub fn attributes_of(path: &Path, _metadata: &Metadata) -> u32 {
    let dotted = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'));
    if dotted { FILE_ATTRIBUTE_HIDDEN } else { 0 }
}
