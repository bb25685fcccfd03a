//! Non-Windows shell: no icons, launching through the desktop's opener.

use std::path::Path;

use crate::IconImage;

pub(crate) fn small_icon(_path: &Path) -> Option<IconImage> {
    None
}

pub(crate) fn shell_open(path: &Path) -> std::io::Result<()> {
    open::that(path)
}
