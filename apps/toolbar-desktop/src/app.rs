//! Application orchestrator: discovery, native icons and the event loop.

use systray_toolbar_shell::SystemShell;
use systray_toolbar_tray::ToolbarRegistry;

use crate::config::Config;

/// Runs the tray until Exit is picked from a menu.
#[cfg(windows)]
pub fn run(config: Config) -> anyhow::Result<()> {
    use anyhow::Context;
    use systray_toolbar_tray::{ClickOutcome, Flow, MouseButton, TrayController, TrayUi};
    use tao::event::Event;
    use tao::event_loop::{ControlFlow, EventLoopBuilder};
    use tao::platform::windows::WindowExtWindows;
    use tao::window::WindowBuilder;
    use tray_icon::menu::MenuEvent;
    use tray_icon::{MouseButton as TrayButton, MouseButtonState, TrayIconEvent};

    use crate::native::NativeTray;

    enum UserEvent {
        Tray(TrayIconEvent),
        Menu(MenuEvent),
    }

    let registry = discover(&config);
    let mut controller = TrayController::new(registry, SystemShell);

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();

    // Owner of the pop-up menus; never shown.
    let window = WindowBuilder::new()
        .with_visible(false)
        .build(&event_loop)
        .context("failed to create the menu owner window")?;
    let mut ui = NativeTray::new(window.hwnd());

    let proxy = event_loop.create_proxy();
    TrayIconEvent::set_event_handler(Some(move |event| {
        let _ = proxy.send_event(UserEvent::Tray(event));
    }));
    let proxy = event_loop.create_proxy();
    MenuEvent::set_event_handler(Some(move |event| {
        let _ = proxy.send_event(UserEvent::Menu(event));
    }));

    controller.bind(&mut ui)?;
    tracing::info!(icons = controller.registry().icons().len(), "tray ready");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        let _owner = &window;

        match event {
            Event::UserEvent(UserEvent::Tray(TrayIconEvent::Click {
                id,
                button,
                button_state: MouseButtonState::Up,
                ..
            })) => {
                let Some(icon) = ui.icon_for(&id) else {
                    return;
                };
                let button = match button {
                    TrayButton::Left => MouseButton::Left,
                    TrayButton::Right => MouseButton::Right,
                    _ => return,
                };
                if controller.on_click(&mut ui, icon, button) == ClickOutcome::SecondaryRevealed {
                    ui.present_menu(icon);
                }
            }
            Event::UserEvent(UserEvent::Menu(event)) => {
                let Some((icon, action)) = ui.action_for(&event.id) else {
                    return;
                };
                match controller.on_action(&mut ui, icon, action) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Exit) => {
                        tracing::info!("tray shut down cleanly");
                        *control_flow = ControlFlow::Exit;
                    }
                    Err(e) => tracing::error!(icon = %icon, "menu action failed: {e}"),
                }
            }
            _ => {}
        }
    })
}

/// The tray needs the Windows shell; elsewhere only discovery runs.
#[cfg(not(windows))]
pub fn run(config: Config) -> anyhow::Result<()> {
    let registry = discover(&config);
    for icon in registry.icons() {
        tracing::info!(icon = %icon.id(), tooltip = icon.tooltip(), "would show tray icon");
    }
    anyhow::bail!("the system tray toolbar is only supported on Windows")
}

fn discover(config: &Config) -> ToolbarRegistry {
    let registry = ToolbarRegistry::discover(&config.toolbars_root, &SystemShell);
    tracing::info!(
        root = %config.toolbars_root.display(),
        icons = registry.icons().len(),
        degenerate = registry.is_degenerate(),
        "toolbars discovered"
    );
    registry
}
