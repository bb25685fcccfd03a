//! Projection of a toolbar folder onto its menu.

use std::io::ErrorKind;
use std::path::Path;

use systray_toolbar_file_ops::list_eligible;
use systray_toolbar_shell::{IconImage, ShellError, ShellMetadataProvider, display_name};

use crate::menu::{MenuEntry, MenuModel, TOOLBAR_EMPTY, TOOLBAR_MISSING, TOOLBAR_UNREADABLE};

/// Builds the menu for the toolbar folder at `root`.
///
/// Files directly under `root` come first, then one sub-menu per folder
/// holding that folder's files. Anything deeper is not shown. A missing,
/// empty or unreadable folder yields a notice menu instead; this never
/// fails, so an icon whose folder vanished keeps working.
pub fn project(root: &Path, shell: &dyn ShellMetadataProvider) -> MenuModel {
    let listing = match list_eligible(root) {
        Ok(listing) => listing,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(root = %root.display(), "toolbar folder missing");
            return MenuModel::notice(root, TOOLBAR_MISSING);
        }
        Err(e) => {
            tracing::warn!(root = %root.display(), "failed to read toolbar folder: {e}");
            return MenuModel::notice(root, TOOLBAR_UNREADABLE);
        }
    };

    if listing.is_empty() {
        return MenuModel::notice(root, TOOLBAR_EMPTY);
    }

    let mut entries = Vec::with_capacity(listing.files.len() + listing.dirs.len());
    entries.extend(listing.files.iter().filter_map(|file| file_entry(file, shell)));

    for dir in &listing.dirs {
        let children = match list_eligible(dir) {
            Ok(inner) => inner
                .files
                .iter()
                .filter_map(|file| file_entry(file, shell))
                .collect(),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), "failed to read sub-folder: {e}");
                Vec::new()
            }
        };

        let (label, icon) = describe_or_fallback(dir, shell);
        entries.push(MenuEntry::directory(dir.clone(), label, icon, children));
    }

    // Every file may have vanished since the listing.
    if entries.is_empty() {
        return MenuModel::notice(root, TOOLBAR_EMPTY);
    }

    tracing::debug!(root = %root.display(), entries = entries.len(), "toolbar projected");
    MenuModel::with_entries(root, entries)
}

fn file_entry(path: &Path, shell: &dyn ShellMetadataProvider) -> Option<MenuEntry> {
    match shell.describe(path) {
        Ok(item) => Some(MenuEntry::file(
            path.to_path_buf(),
            item.display_name,
            item.icon,
        )),
        Err(ShellError::NotFound(_)) => {
            tracing::debug!(path = %path.display(), "entry vanished during projection");
            None
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), "shell description failed: {e}");
            Some(MenuEntry::file(path.to_path_buf(), display_name(path), None))
        }
    }
}

fn describe_or_fallback(
    path: &Path,
    shell: &dyn ShellMetadataProvider,
) -> (String, Option<IconImage>) {
    match shell.describe(path) {
        Ok(item) => (item.display_name, item.icon),
        Err(e) => {
            tracing::debug!(path = %path.display(), "shell description failed: {e}");
            (display_name(path), None)
        }
    }
}
