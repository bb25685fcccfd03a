//! Test helpers for real Win32 file attributes.

use std::os::windows::ffi::OsStrExt;
use std::path::Path;

use windows_sys::Win32::Storage::FileSystem::SetFileAttributesW;

/// Replaces the attribute bits of `path`.
pub(crate) fn set_attributes(path: &Path, attributes: u32) {
    let wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();
    // SAFETY: wide is NUL-terminated and outlives the call.
    let ok = unsafe { SetFileAttributesW(wide.as_ptr(), attributes) };
    assert_ne!(ok, 0, "SetFileAttributesW failed on {}", path.display());
}
