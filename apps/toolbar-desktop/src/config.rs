//! Startup configuration.
//!
//! There is no configuration file: everything derives from the user profile
//! directory, whose `Toolbars` folder holds one sub-folder per tray icon.

use std::path::{Path, PathBuf};

use anyhow::Context;
use systray_toolbar_file_ops::toolbars_path;

/// Resolved startup settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// User profile directory (`%USERPROFILE%` on Windows).
    pub profile: PathBuf,

    /// `<profile>/Toolbars`. Need not exist.
    pub toolbars_root: PathBuf,
}

impl Config {
    /// Resolves the configuration for the current user.
    pub fn load() -> anyhow::Result<Self> {
        let profile = dirs::home_dir().context("could not determine the user profile folder")?;
        Ok(Self::for_profile(&profile))
    }

    /// Configuration rooted at an explicit profile directory.
    pub fn for_profile(profile: &Path) -> Self {
        Self {
            profile: profile.to_path_buf(),
            toolbars_root: toolbars_path(profile),
        }
    }
}
