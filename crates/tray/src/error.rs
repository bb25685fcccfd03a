//! Tray controller error types.

use systray_toolbar_shell::ShellError;

use crate::registry::IconId;

/// Errors produced while handling tray input.
#[derive(Debug, thiserror::Error)]
pub enum TrayError {
    #[error("launch failed: {0}")]
    Launch(#[source] ShellError),

    #[error("no tray icon with id {0}")]
    UnknownIcon(IconId),

    #[error("tray icon {0} was already destroyed")]
    Destroyed(IconId),

    #[error("tray UI error: {0}")]
    Ui(String),
}
