//! Test doubles for the shell and the native tray.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use systray_toolbar_shell::{
    FileLauncher, IconImage, ShellError, ShellItem, ShellMetadataProvider, display_name,
};

use crate::controller::TrayUi;
use crate::error::TrayError;
use crate::menu::MenuModel;
use crate::registry::{Balloon, IconId, TrayIconState};

/// Shell that answers from the real filesystem but never touches the OS shell.
#[derive(Default)]
pub(crate) struct FakeShell {
    vanished: HashSet<PathBuf>,
    failing: HashSet<PathBuf>,
    launched: RefCell<Vec<PathBuf>>,
}

impl FakeShell {
    /// Pretends `path` disappears between listing and description.
    pub fn vanishing(mut self, path: PathBuf) -> Self {
        self.vanished.insert(path);
        self
    }

    /// Makes launches of `path` fail.
    pub fn failing(mut self, path: PathBuf) -> Self {
        self.failing.insert(path);
        self
    }

    pub fn launched(&self) -> Vec<PathBuf> {
        self.launched.borrow().clone()
    }
}

impl ShellMetadataProvider for FakeShell {
    fn describe(&self, path: &Path) -> Result<ShellItem, ShellError> {
        if self.vanished.contains(path) || !path.exists() {
            return Err(ShellError::NotFound(path.to_path_buf()));
        }
        Ok(ShellItem {
            display_name: display_name(path),
            icon: IconImage::from_bgra(vec![0, 0, 0, 255], 1, 1),
        })
    }
}

impl FileLauncher for FakeShell {
    fn launch(&self, path: &Path) -> Result<(), ShellError> {
        if self.failing.contains(path) {
            return Err(ShellError::Launch {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no handler"),
            });
        }
        self.launched.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

/// Replaces the Win32 attribute bits of `path`.
#[cfg(windows)]
pub(crate) fn set_attributes(path: &Path, attributes: u32) {
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Storage::FileSystem::SetFileAttributesW;

    let wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();
    // SAFETY: wide is NUL-terminated and outlives the call.
    let ok = unsafe { SetFileAttributesW(wide.as_ptr(), attributes) };
    assert_ne!(ok, 0, "SetFileAttributesW failed on {}", path.display());
}

/// Calls the controller made on the native tray.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UiCall {
    Add(IconId),
    SecondaryVisible(IconId, bool),
    Present(IconId),
    Balloon(IconId, String),
    Rebuild(IconId),
    Hide(IconId),
}

/// Native tray stand-in that records calls and what a presented menu showed.
#[derive(Default)]
pub(crate) struct RecordingUi {
    pub calls: Vec<UiCall>,
    /// Secondary visibility as the native menu currently has it.
    pub secondary: HashMap<IconId, bool>,
    /// Number of control rows visible at each presentation.
    pub presented_controls: Vec<usize>,
    /// Latest menu handed over per icon.
    pub menus: HashMap<IconId, MenuModel>,
}

impl RecordingUi {
    pub fn presentations(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, UiCall::Present(_)))
            .count()
    }

    pub fn balloons(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, UiCall::Balloon(..)))
            .count()
    }
}

impl TrayUi for RecordingUi {
    fn add_icon(&mut self, state: &TrayIconState) -> Result<(), TrayError> {
        self.secondary.insert(state.id(), false);
        self.menus.insert(state.id(), state.model().clone());
        self.calls.push(UiCall::Add(state.id()));
        Ok(())
    }

    fn set_secondary_visible(&mut self, icon: IconId, visible: bool) {
        self.secondary.insert(icon, visible);
        self.calls.push(UiCall::SecondaryVisible(icon, visible));
    }

    fn present_menu(&mut self, icon: IconId) {
        let visible = self.secondary.get(&icon).copied().unwrap_or(false);
        let controls = self
            .menus
            .get(&icon)
            .map(|m| m.visible_items(visible).filter(|i| i.is_control()).count())
            .unwrap_or(0);
        self.presented_controls.push(controls);
        self.calls.push(UiCall::Present(icon));
    }

    fn show_balloon(&mut self, icon: IconId, balloon: &Balloon) {
        self.calls.push(UiCall::Balloon(icon, balloon.title.clone()));
    }

    fn rebuild_menu(&mut self, icon: IconId, model: &MenuModel) {
        self.secondary.insert(icon, false);
        self.menus.insert(icon, model.clone());
        self.calls.push(UiCall::Rebuild(icon));
    }

    fn hide_icon(&mut self, icon: IconId) {
        self.calls.push(UiCall::Hide(icon));
    }
}
