//! Toolbar discovery and per-icon state.
//!
//! Discovery runs once at startup. Each folder directly under the toolbars
//! root becomes one tray icon; when the root is missing or holds no folders
//! a single "degenerate" icon explains how to set it up instead.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use systray_toolbar_file_ops::{TOOLBARS_DIR, list_subdirectories};
use systray_toolbar_shell::{IconImage, ShellMetadataProvider};

use crate::menu::MenuModel;
use crate::projector::project;

/// How long the setup balloon stays up.
pub const BALLOON_TIMEOUT: Duration = Duration::from_secs(30);

/// Tooltip of the degenerate icon.
pub const GLOBAL_TOOLTIP: &str = "Toolbar";

/// Identifies one tray icon for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IconId(pub usize);

impl fmt::Display for IconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toolbar-{}", self.0)
    }
}

/// One folder under the toolbars root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarRoot {
    pub path: PathBuf,
    /// Folder name.
    pub name: String,
}

impl ToolbarRoot {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }

    /// Tooltip of the toolbar's tray icon.
    pub fn tooltip(&self) -> String {
        format!("Toolbar: {}", self.name)
    }
}

/// What a tray icon stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconKind {
    Toolbar(ToolbarRoot),
    /// The toolbars root does not exist.
    RootMissing,
    /// The toolbars root exists but holds no folders.
    RootEmpty,
}

/// A one-shot notification attached to the degenerate icon.
///
/// Always presented as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balloon {
    pub title: String,
    pub text: String,
    /// Auto-dismiss delay.
    pub timeout: Duration,
}

/// Whether the control rows of a menu are currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecondaryVisibility {
    #[default]
    Hidden,
    Visible,
}

/// State of one tray icon.
#[derive(Debug, Clone)]
pub struct TrayIconState {
    id: IconId,
    kind: IconKind,
    model: MenuModel,
    tooltip: String,
    icon: Option<IconImage>,
    balloon: Option<Balloon>,
    secondary: SecondaryVisibility,
    destroyed: bool,
}

impl TrayIconState {
    fn new(id: IconId, kind: IconKind, model: MenuModel, tooltip: String) -> Self {
        Self {
            id,
            kind,
            model,
            tooltip,
            icon: None,
            balloon: None,
            secondary: SecondaryVisibility::Hidden,
            destroyed: false,
        }
    }

    pub fn id(&self) -> IconId {
        self.id
    }

    pub fn kind(&self) -> &IconKind {
        &self.kind
    }

    pub fn model(&self) -> &MenuModel {
        &self.model
    }

    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    /// Tray image; `None` means the caller should use its default folder icon.
    pub fn icon(&self) -> Option<&IconImage> {
        self.icon.as_ref()
    }

    /// Set only on the degenerate icon.
    pub fn balloon(&self) -> Option<&Balloon> {
        self.balloon.as_ref()
    }

    pub fn secondary(&self) -> SecondaryVisibility {
        self.secondary
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// True for the single fallback icon shown when no toolbar exists.
    pub fn is_degenerate(&self) -> bool {
        !matches!(self.kind, IconKind::Toolbar(_))
    }

    /// The toolbar folder, for toolbar icons.
    pub fn toolbar(&self) -> Option<&ToolbarRoot> {
        match &self.kind {
            IconKind::Toolbar(root) => Some(root),
            _ => None,
        }
    }

    pub(crate) fn set_secondary(&mut self, secondary: SecondaryVisibility) {
        self.secondary = secondary;
    }

    /// Replaces the menu wholesale; controls start hidden again.
    pub(crate) fn replace_model(&mut self, model: MenuModel) {
        self.model = model;
        self.secondary = SecondaryVisibility::Hidden;
    }

    pub(crate) fn destroy(&mut self) {
        self.destroyed = true;
    }
}

/// Owns every tray icon's state.
#[derive(Debug, Clone)]
pub struct ToolbarRegistry {
    root_parent: PathBuf,
    icons: Vec<TrayIconState>,
}

impl ToolbarRegistry {
    /// Discovers the toolbars under `root_parent` (`<profile>/Toolbars`).
    pub fn discover(root_parent: &Path, shell: &dyn ShellMetadataProvider) -> Self {
        let folders = match list_subdirectories(root_parent) {
            Ok(folders) => folders,
            Err(e) => {
                if e.kind() == std::io::ErrorKind::NotFound {
                    tracing::warn!(root = %root_parent.display(), "toolbars root not found");
                } else {
                    tracing::error!(root = %root_parent.display(), "failed to read toolbars root: {e}");
                }
                return Self::degenerate(root_parent, IconKind::RootMissing, shell);
            }
        };

        if folders.is_empty() {
            tracing::warn!(root = %root_parent.display(), "toolbars root has no folders");
            return Self::degenerate(root_parent, IconKind::RootEmpty, shell);
        }

        let icons = folders
            .into_iter()
            .enumerate()
            .map(|(index, path)| {
                let root = ToolbarRoot::new(path);
                let model = project(&root.path, shell);
                let tooltip = root.tooltip();
                let icon = shell.describe(&root.path).ok().and_then(|item| item.icon);
                tracing::info!(toolbar = %root.name, path = %root.path.display(), "toolbar discovered");

                let mut state =
                    TrayIconState::new(IconId(index), IconKind::Toolbar(root), model, tooltip);
                state.icon = icon;
                state
            })
            .collect();

        Self {
            root_parent: root_parent.to_path_buf(),
            icons,
        }
    }

    fn degenerate(root_parent: &Path, kind: IconKind, shell: &dyn ShellMetadataProvider) -> Self {
        let (model, balloon) = match kind {
            IconKind::RootEmpty => (
                MenuModel::root_empty(root_parent),
                Balloon {
                    title: crate::menu::ROOT_EMPTY.to_string(),
                    text: format!(
                        "Add a folder to {}. Each folder located in the '{TOOLBARS_DIR}' folder \
                         will become a toolbar with its own icon in the system tray.",
                        root_parent.display()
                    ),
                    timeout: BALLOON_TIMEOUT,
                },
            ),
            _ => (
                MenuModel::root_missing(root_parent),
                Balloon {
                    title: crate::menu::ROOT_MISSING.to_string(),
                    text: format!(
                        "Add a '{TOOLBARS_DIR}' folder to your user profile folder. The full path \
                         is: {}. Each folder located in the '{TOOLBARS_DIR}' folder will become \
                         a toolbar with its own icon in the system tray.",
                        root_parent.display()
                    ),
                    timeout: BALLOON_TIMEOUT,
                },
            ),
        };

        // Closest existing folder, for a folder-looking tray image.
        let icon = root_parent
            .ancestors()
            .find(|p| p.is_dir())
            .and_then(|p| shell.describe(p).ok())
            .and_then(|item| item.icon);

        let mut state = TrayIconState::new(IconId(0), kind, model, GLOBAL_TOOLTIP.to_string());
        state.icon = icon;
        state.balloon = Some(balloon);

        Self {
            root_parent: root_parent.to_path_buf(),
            icons: vec![state],
        }
    }

    /// The toolbars root this registry was discovered from.
    pub fn root_parent(&self) -> &Path {
        &self.root_parent
    }

    pub fn icons(&self) -> &[TrayIconState] {
        &self.icons
    }

    pub fn get(&self, id: IconId) -> Option<&TrayIconState> {
        self.icons.iter().find(|icon| icon.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: IconId) -> Option<&mut TrayIconState> {
        self.icons.iter_mut().find(|icon| icon.id == id)
    }

    pub(crate) fn icons_mut(&mut self) -> &mut [TrayIconState] {
        &mut self.icons
    }

    /// True if discovery fell back to the single explanatory icon.
    pub fn is_degenerate(&self) -> bool {
        self.icons.iter().any(TrayIconState::is_degenerate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{ControlEntry, ROOT_EMPTY, ROOT_MISSING};
    use crate::testing::FakeShell;
    use std::fs;

    #[test]
    fn missing_root_gives_single_degenerate_icon() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("Toolbars");

        let registry = ToolbarRegistry::discover(&root, &FakeShell::default());

        assert_eq!(registry.icons().len(), 1);
        assert!(registry.is_degenerate());
        let icon = &registry.icons()[0];
        assert_eq!(icon.kind(), &IconKind::RootMissing);
        assert_eq!(icon.tooltip(), GLOBAL_TOOLTIP);
        assert_eq!(icon.model().notices().next(), Some(ROOT_MISSING));
        let balloon = icon.balloon().unwrap();
        assert_eq!(balloon.title, ROOT_MISSING);
        assert!(balloon.text.contains(&root.display().to_string()));
        assert_eq!(balloon.timeout, BALLOON_TIMEOUT);
        // Icon borrowed from the nearest existing folder.
        assert!(icon.icon().is_some());
    }

    #[test]
    fn empty_root_gives_single_degenerate_icon() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("Toolbars");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("stray.txt"), "x").unwrap();

        let registry = ToolbarRegistry::discover(&root, &FakeShell::default());

        assert_eq!(registry.icons().len(), 1);
        let icon = &registry.icons()[0];
        assert_eq!(icon.kind(), &IconKind::RootEmpty);
        assert_eq!(icon.model().notices().next(), Some(ROOT_EMPTY));
        assert_eq!(icon.balloon().unwrap().title, ROOT_EMPTY);
        assert!(icon.model().controls().any(|c| c == ControlEntry::OpenInExplorer));
    }

    #[test]
    fn one_icon_per_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("Toolbars");
        fs::create_dir_all(root.join("Dev")).unwrap();
        fs::create_dir_all(root.join("Games")).unwrap();
        fs::write(root.join("Dev").join("run.exe"), "x").unwrap();
        fs::write(root.join("not-a-toolbar.txt"), "x").unwrap();

        let registry = ToolbarRegistry::discover(&root, &FakeShell::default());

        assert!(!registry.is_degenerate());
        assert_eq!(registry.root_parent(), root.as_path());
        assert_eq!(registry.icons().len(), 2);

        let mut tooltips: Vec<&str> = registry.icons().iter().map(|i| i.tooltip()).collect();
        tooltips.sort();
        assert_eq!(tooltips, vec!["Toolbar: Dev", "Toolbar: Games"]);

        for icon in registry.icons() {
            assert!(icon.balloon().is_none());
            assert_eq!(icon.secondary(), SecondaryVisibility::Hidden);
            assert!(!icon.is_destroyed());
            let toolbar = icon.toolbar().unwrap();
            assert_eq!(icon.model().root, toolbar.path);
            assert!(icon.icon().is_some());
        }

        let dev = registry
            .icons()
            .iter()
            .find(|i| i.toolbar().unwrap().name == "Dev")
            .unwrap();
        assert_eq!(dev.model().entries().count(), 1);
        let games = registry
            .icons()
            .iter()
            .find(|i| i.toolbar().unwrap().name == "Games")
            .unwrap();
        assert_eq!(games.model().notices().count(), 2);
    }

    #[test]
    fn ids_are_distinct_and_resolvable() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["A", "B", "C"] {
            fs::create_dir(tmp.path().join(name)).unwrap();
        }

        let registry = ToolbarRegistry::discover(tmp.path(), &FakeShell::default());

        for icon in registry.icons() {
            assert_eq!(registry.get(icon.id()).unwrap().tooltip(), icon.tooltip());
        }
        assert!(registry.get(IconId(99)).is_none());
    }

    #[test]
    fn toolbar_root_name_and_tooltip() {
        let root = ToolbarRoot::new(PathBuf::from("/home/ana/Toolbars/Dev"));
        assert_eq!(root.name, "Dev");
        assert_eq!(root.tooltip(), "Toolbar: Dev");
    }

    #[test]
    fn icon_id_display() {
        assert_eq!(IconId(3).to_string(), "toolbar-3");
    }
}
