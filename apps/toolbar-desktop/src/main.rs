//! System tray toolbar entry point.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod config;
mod icons;
#[cfg(windows)]
mod native;

use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting system tray toolbar"
    );

    let config = config::Config::load()?;
    tracing::info!(
        profile = %config.profile.display(),
        root = %config.toolbars_root.display(),
        "configuration loaded"
    );

    app::run(config)
}
