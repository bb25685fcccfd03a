//! Input handling for the toolbar tray icons.
//!
//! The controller owns the [`ToolbarRegistry`] and turns clicks and menu
//! selections into state changes plus calls on a [`TrayUi`]. The native side
//! never decides anything on its own: it reports input, then renders what it
//! is told. Menus are never attached to the OS icon, so the visibility of the
//! control rows is always settled before a menu is presented.

use systray_toolbar_shell::{FileLauncher, ShellMetadataProvider};

use crate::error::TrayError;
use crate::menu::{MenuAction, MenuModel};
use crate::projector::project;
use crate::registry::{Balloon, IconId, SecondaryVisibility, ToolbarRegistry, TrayIconState};

/// Mouse button of a tray click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// What a click ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The menu was presented with its controls hidden.
    MenuPresented,
    /// Controls were made visible; the native menu opens on its own.
    SecondaryRevealed,
    /// The degenerate icon showed its setup balloon.
    BalloonShown,
    /// Unknown or destroyed icon.
    Ignored,
}

/// Whether the event loop keeps running after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Native tray surface driven by the controller.
pub trait TrayUi {
    /// Creates the OS icon for `state` with its tooltip, image and menu.
    fn add_icon(&mut self, state: &TrayIconState) -> Result<(), TrayError>;

    /// Shows or hides the control rows of the icon's menu.
    fn set_secondary_visible(&mut self, icon: IconId, visible: bool);

    /// Pops the icon's menu up at the cursor.
    fn present_menu(&mut self, icon: IconId);

    fn show_balloon(&mut self, icon: IconId, balloon: &Balloon);

    /// Replaces the icon's native menu; controls start hidden.
    fn rebuild_menu(&mut self, icon: IconId, model: &MenuModel);

    fn hide_icon(&mut self, icon: IconId);
}

/// Dispatches tray input for every icon of the process.
pub struct TrayController<S> {
    registry: ToolbarRegistry,
    shell: S,
}

impl<S> TrayController<S>
where
    S: ShellMetadataProvider + FileLauncher,
{
    pub fn new(registry: ToolbarRegistry, shell: S) -> Self {
        Self { registry, shell }
    }

    /// Adds one native icon per registry entry.
    ///
    /// Stops at the first icon the UI refuses.
    pub fn bind(&self, ui: &mut dyn TrayUi) -> Result<(), TrayError> {
        for icon in self.registry.icons() {
            ui.add_icon(icon)?;
            tracing::debug!(icon = %icon.id(), tooltip = icon.tooltip(), "tray icon added");
        }
        Ok(())
    }

    pub fn registry(&self) -> &ToolbarRegistry {
        &self.registry
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    /// Handles a button release on a tray icon.
    ///
    /// A left click presents the menu with only its entries. A right click
    /// makes the controls visible and leaves presentation to the caller, which
    /// opens the menu the way the platform does for context clicks. On the
    /// degenerate icon a left click re-shows the setup balloon instead.
    pub fn on_click(
        &mut self,
        ui: &mut dyn TrayUi,
        id: IconId,
        button: MouseButton,
    ) -> ClickOutcome {
        let Some(state) = self.registry.get_mut(id) else {
            tracing::debug!(icon = %id, "click on unknown icon ignored");
            return ClickOutcome::Ignored;
        };
        if state.is_destroyed() {
            return ClickOutcome::Ignored;
        }

        match button {
            MouseButton::Left => {
                if let Some(balloon) = state.balloon() {
                    ui.show_balloon(id, balloon);
                    return ClickOutcome::BalloonShown;
                }
                state.set_secondary(SecondaryVisibility::Hidden);
                ui.set_secondary_visible(id, false);
                ui.present_menu(id);
                ClickOutcome::MenuPresented
            }
            MouseButton::Right => {
                state.set_secondary(SecondaryVisibility::Visible);
                ui.set_secondary_visible(id, true);
                ClickOutcome::SecondaryRevealed
            }
        }
    }

    /// Handles a menu selection on icon `id`.
    pub fn on_action(
        &mut self,
        ui: &mut dyn TrayUi,
        id: IconId,
        action: MenuAction,
    ) -> Result<Flow, TrayError> {
        let state = self.registry.get(id).ok_or(TrayError::UnknownIcon(id))?;
        if state.is_destroyed() {
            return Err(TrayError::Destroyed(id));
        }

        match action {
            MenuAction::Launch(path) => {
                self.shell.launch(&path).map_err(TrayError::Launch)?;
                Ok(Flow::Continue)
            }
            MenuAction::OpenInExplorer => {
                let root = state.model().root.clone();
                self.shell.launch(&root).map_err(TrayError::Launch)?;
                Ok(Flow::Continue)
            }
            MenuAction::Update => {
                self.refresh(ui, id);
                Ok(Flow::Continue)
            }
            MenuAction::Exit => {
                self.exit(ui);
                Ok(Flow::Exit)
            }
        }
    }

    /// Re-projects a toolbar folder and swaps the icon's menu.
    fn refresh(&mut self, ui: &mut dyn TrayUi, id: IconId) {
        let Some(state) = self.registry.get_mut(id) else {
            return;
        };
        let Some(toolbar) = state.toolbar() else {
            tracing::debug!(icon = %id, "update ignored on degenerate icon");
            return;
        };

        let model = project(&toolbar.path, &self.shell);
        tracing::info!(icon = %id, root = %model.root.display(), "toolbar menu updated");
        ui.rebuild_menu(id, &model);
        state.replace_model(model);
    }

    /// Hides every icon. The registry stays around but no icon accepts input.
    fn exit(&mut self, ui: &mut dyn TrayUi) {
        for state in self.registry.icons_mut() {
            if !state.is_destroyed() {
                state.destroy();
                ui.hide_icon(state.id());
            }
        }
        tracing::info!("exit requested from tray");
    }
}
