//! Windows tray binding on top of `tray-icon` and its `muda` menus.
//!
//! Menus are never attached to the tray icons. Every pop-up goes through
//! [`TrayUi::present_menu`], after the controller has settled which rows
//! are visible.

use std::collections::HashMap;

use systray_toolbar_tray::{
    Balloon, ControlEntry, EntryKind, IconId, MenuAction, MenuEntry, MenuItem, MenuModel,
    TrayError, TrayIconState, TrayUi,
};
use tray_icon::menu::{
    ContextMenu, Icon as MenuIcon, IconMenuItem, IsMenuItem, Menu, MenuId,
    MenuItem as TextItem, PredefinedMenuItem, Submenu,
};
use tray_icon::{TrayIcon, TrayIconBuilder, TrayIconId};

use crate::icons;

fn ui_error(e: impl std::fmt::Display) -> TrayError {
    TrayError::Ui(e.to_string())
}

/// Win32 menus treat `&` as a mnemonic marker.
fn escape_label(label: &str) -> String {
    label.replace('&', "&&")
}

enum ControlItem {
    Separator(PredefinedMenuItem),
    Text(TextItem),
}

impl ControlItem {
    fn as_item(&self) -> &dyn IsMenuItem {
        match self {
            ControlItem::Separator(item) => item,
            ControlItem::Text(item) => item,
        }
    }
}

/// A native menu with its trailing control rows, which are detached from
/// the menu while hidden.
struct NativeMenu {
    menu: Menu,
    controls: Vec<ControlItem>,
    controls_shown: bool,
}

impl NativeMenu {
    fn set_controls_shown(&mut self, shown: bool) -> Result<(), TrayError> {
        if shown == self.controls_shown {
            return Ok(());
        }
        for control in &self.controls {
            if shown {
                self.menu.append(control.as_item()).map_err(ui_error)?;
            } else {
                self.menu.remove(control.as_item()).map_err(ui_error)?;
            }
        }
        self.controls_shown = shown;
        Ok(())
    }
}

struct NativeIcon {
    tray: TrayIcon,
    menu: NativeMenu,
}

/// Owns the OS tray icons and maps native ids back to controller ids.
pub struct NativeTray {
    /// Window that owns the pop-up menus.
    hwnd: isize,
    icons: HashMap<IconId, NativeIcon>,
    tray_ids: HashMap<TrayIconId, IconId>,
    actions: HashMap<MenuId, (IconId, MenuAction)>,
}

impl NativeTray {
    pub fn new(hwnd: isize) -> Self {
        Self {
            hwnd,
            icons: HashMap::new(),
            tray_ids: HashMap::new(),
            actions: HashMap::new(),
        }
    }

    /// Controller id of a native tray icon.
    pub fn icon_for(&self, tray_id: &TrayIconId) -> Option<IconId> {
        self.tray_ids.get(tray_id).copied()
    }

    /// Icon and action bound to a clicked menu row.
    pub fn action_for(&self, menu_id: &MenuId) -> Option<(IconId, MenuAction)> {
        self.actions.get(menu_id).cloned()
    }

    fn build_menu(&mut self, icon: IconId, model: &MenuModel) -> Result<NativeMenu, TrayError> {
        let menu = Menu::new();
        let mut controls = Vec::new();

        for item in &model.items {
            match item {
                MenuItem::Entry(entry) => match entry.kind {
                    EntryKind::File => {
                        let row = self.file_item(icon, entry);
                        menu.append(&row).map_err(ui_error)?;
                    }
                    EntryKind::Directory => {
                        let submenu = Submenu::new(escape_label(&entry.label), true);
                        for child in &entry.children {
                            let row = self.file_item(icon, child);
                            submenu.append(&row).map_err(ui_error)?;
                        }
                        menu.append(&submenu).map_err(ui_error)?;
                    }
                },
                MenuItem::Info(text) => {
                    let row = TextItem::new(escape_label(text), false, None);
                    menu.append(&row).map_err(ui_error)?;
                }
                MenuItem::Control(control) => controls.push(self.control_item(icon, *control)),
            }
        }

        Ok(NativeMenu {
            menu,
            controls,
            controls_shown: false,
        })
    }

    fn file_item(&mut self, icon: IconId, entry: &MenuEntry) -> IconMenuItem {
        let image = entry
            .icon
            .as_ref()
            .and_then(|img| MenuIcon::from_rgba(img.rgba.clone(), img.width, img.height).ok());
        let row = IconMenuItem::new(escape_label(&entry.label), true, image, None);
        self.actions.insert(
            row.id().clone(),
            (icon, MenuAction::Launch(entry.path.clone())),
        );
        row
    }

    fn control_item(&mut self, icon: IconId, control: ControlEntry) -> ControlItem {
        match control.action() {
            None => ControlItem::Separator(PredefinedMenuItem::separator()),
            Some(action) => {
                let row = TextItem::new(control.label(), true, None);
                self.actions.insert(row.id().clone(), (icon, action));
                ControlItem::Text(row)
            }
        }
    }
}

impl TrayUi for NativeTray {
    fn add_icon(&mut self, state: &TrayIconState) -> Result<(), TrayError> {
        let menu = self.build_menu(state.id(), state.model())?;

        let (rgba, width, height) = icons::tray_rgba(state.icon());
        let image = tray_icon::Icon::from_rgba(rgba, width, height).map_err(ui_error)?;
        let tray_id = TrayIconId::new(state.id().to_string());
        let tray = TrayIconBuilder::new()
            .with_id(tray_id.clone())
            .with_tooltip(state.tooltip())
            .with_icon(image)
            .build()
            .map_err(ui_error)?;

        self.tray_ids.insert(tray_id, state.id());
        self.icons.insert(state.id(), NativeIcon { tray, menu });
        Ok(())
    }

    fn set_secondary_visible(&mut self, icon: IconId, visible: bool) {
        let Some(native) = self.icons.get_mut(&icon) else {
            return;
        };
        if let Err(e) = native.menu.set_controls_shown(visible) {
            tracing::warn!(icon = %icon, visible, "failed to toggle menu controls: {e}");
        }
    }

    fn present_menu(&mut self, icon: IconId) {
        let Some(native) = self.icons.get(&icon) else {
            return;
        };
        // The return value only says whether a row was picked; the pick
        // itself arrives as a menu event.
        #[allow(unused_unsafe)]
        let _ = unsafe { native.menu.menu.show_context_menu_for_hwnd(self.hwnd, None) };
    }

    fn show_balloon(&mut self, icon: IconId, balloon: &Balloon) {
        let millis = u32::try_from(balloon.timeout.as_millis()).unwrap_or(u32::MAX);
        let shown = notify_rust::Notification::new()
            .summary(&balloon.title)
            .body(&balloon.text)
            .timeout(notify_rust::Timeout::Milliseconds(millis))
            .show();
        if let Err(e) = shown {
            tracing::warn!(icon = %icon, "failed to show notification: {e}");
        }
    }

    fn rebuild_menu(&mut self, icon: IconId, model: &MenuModel) {
        self.actions.retain(|_, (owner, _)| *owner != icon);
        match self.build_menu(icon, model) {
            Ok(menu) => {
                if let Some(native) = self.icons.get_mut(&icon) {
                    native.menu = menu;
                }
            }
            Err(e) => tracing::error!(icon = %icon, "failed to rebuild menu: {e}"),
        }
    }

    fn hide_icon(&mut self, icon: IconId) {
        self.actions.retain(|_, (owner, _)| *owner != icon);
        self.tray_ids.retain(|_, owner| *owner != icon);
        if let Some(native) = self.icons.remove(&icon) {
            if let Err(e) = native.tray.set_visible(false) {
                tracing::warn!(icon = %icon, "failed to hide tray icon: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ampersands_escaped() {
        assert_eq!(escape_label("Tom & Jerry"), "Tom && Jerry");
        assert_eq!(escape_label("plain"), "plain");
    }
}
