//! Toolbar tray icons, independent of any native tray library.
//!
//! Every folder under `<profile>/Toolbars` gets one tray icon whose menu
//! mirrors the folder's files and first-level sub-folders:
//! - [`ToolbarRegistry`] discovers the folders once at startup
//! - [`project`] turns one folder into a [`MenuModel`]
//! - [`TrayController`] reacts to clicks and menu selections and drives a
//!   [`TrayUi`] implementation
//!
//! # Platform notes
//! - Left click shows only the entries; right click adds the controls
//!   (Update, Open in Explorer, Exit)
//! - The native side must present menus itself after calling into the
//!   controller, never through an auto-attached context menu

mod controller;
mod error;
mod menu;
mod projector;
mod registry;

#[cfg(test)]
mod testing;

pub use controller::{ClickOutcome, Flow, MouseButton, TrayController, TrayUi};
pub use error::TrayError;
pub use menu::{ControlEntry, EntryKind, MenuAction, MenuEntry, MenuItem, MenuModel};
pub use projector::project;
pub use registry::{
    BALLOON_TIMEOUT, Balloon, GLOBAL_TOOLTIP, IconId, IconKind, SecondaryVisibility,
    ToolbarRegistry, ToolbarRoot, TrayIconState,
};
