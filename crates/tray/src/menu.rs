//! Menu model for a toolbar tray icon.
//!
//! A [`MenuModel`] is a flat list of [`MenuItem`]s split into two fixed
//! partitions: primary items (files, folders and informational rows) and the
//! trailing [`ControlEntry`] rows. Controls are "secondary": they are only
//! shown when the menu was opened with a right-click.

use std::path::{Path, PathBuf};

use systray_toolbar_shell::IconImage;

/// Whether an entry targets a file or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A launchable file or a folder sub-menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Absolute target path.
    pub path: PathBuf,
    /// Display label.
    pub label: String,
    /// Shell icon, already detached from its OS handle.
    pub icon: Option<IconImage>,
    pub kind: EntryKind,
    /// Files inside a folder entry. Always empty for files; never nested
    /// further than one level.
    pub children: Vec<MenuEntry>,
}

impl MenuEntry {
    /// Creates a file entry.
    pub fn file(path: PathBuf, label: String, icon: Option<IconImage>) -> Self {
        Self {
            path,
            label,
            icon,
            kind: EntryKind::File,
            children: Vec::new(),
        }
    }

    /// Creates a folder entry with its files.
    pub fn directory(
        path: PathBuf,
        label: String,
        icon: Option<IconImage>,
        children: Vec<MenuEntry>,
    ) -> Self {
        Self {
            path,
            label,
            icon,
            kind: EntryKind::Directory,
            children,
        }
    }
}

/// The fixed trailing rows of every toolbar menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEntry {
    Separator,
    Update,
    OpenInExplorer,
    Exit,
}

impl ControlEntry {
    /// Every control, in menu order.
    pub const ALL: [ControlEntry; 4] = [
        ControlEntry::Separator,
        ControlEntry::Update,
        ControlEntry::OpenInExplorer,
        ControlEntry::Exit,
    ];

    /// Display label with its `&` access-key marker; empty for the separator.
    pub fn label(self) -> &'static str {
        match self {
            ControlEntry::Separator => "",
            ControlEntry::Update => "&Update",
            ControlEntry::OpenInExplorer => "&Open in Explorer",
            ControlEntry::Exit => "E&xit",
        }
    }

    /// The action triggered on click. The separator has none.
    pub fn action(self) -> Option<MenuAction> {
        match self {
            ControlEntry::Separator => None,
            ControlEntry::Update => Some(MenuAction::Update),
            ControlEntry::OpenInExplorer => Some(MenuAction::OpenInExplorer),
            ControlEntry::Exit => Some(MenuAction::Exit),
        }
    }
}

/// Actions that can be triggered from a tray context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Open a file entry with its default handler.
    Launch(PathBuf),
    /// Re-read the toolbar folder and rebuild the menu.
    Update,
    /// Open the toolbar folder itself.
    OpenInExplorer,
    /// Hide every icon and quit.
    Exit,
}

/// One row of a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Entry(MenuEntry),
    /// Disabled informational text.
    Info(String),
    Control(ControlEntry),
}

impl MenuItem {
    /// True for the secondary partition.
    pub fn is_control(&self) -> bool {
        matches!(self, MenuItem::Control(_))
    }
}

pub(crate) const TOOLBAR_MISSING: &str = "Toolbar folder doesn't exist";
pub(crate) const TOOLBAR_EMPTY: &str = "Toolbar folder is empty";
pub(crate) const TOOLBAR_UNREADABLE: &str = "Toolbar folder can't be read";
pub(crate) const ROOT_MISSING: &str = "Root toolbar folder doesn't exist";
pub(crate) const ROOT_EMPTY: &str = "Root toolbar folder is empty";

/// The complete menu of one tray icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuModel {
    /// Folder the menu mirrors; Open in Explorer and Update act on it.
    pub root: PathBuf,
    pub items: Vec<MenuItem>,
}

impl MenuModel {
    /// Menu listing `entries` followed by every control.
    pub fn with_entries(root: &Path, entries: Vec<MenuEntry>) -> Self {
        let mut items: Vec<MenuItem> = entries.into_iter().map(MenuItem::Entry).collect();
        items.extend(ControlEntry::ALL.map(MenuItem::Control));
        Self {
            root: root.to_path_buf(),
            items,
        }
    }

    /// Two disabled rows (a notice and the folder path) followed by every control.
    pub fn notice(root: &Path, message: &str) -> Self {
        let mut items = vec![
            MenuItem::Info(message.to_string()),
            MenuItem::Info(root.display().to_string()),
        ];
        items.extend(ControlEntry::ALL.map(MenuItem::Control));
        Self {
            root: root.to_path_buf(),
            items,
        }
    }

    /// Menu of the global icon shown when the toolbars root is missing.
    pub(crate) fn root_missing(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            items: vec![
                MenuItem::Info(ROOT_MISSING.to_string()),
                MenuItem::Control(ControlEntry::Separator),
                MenuItem::Control(ControlEntry::Exit),
            ],
        }
    }

    /// Menu of the global icon shown when the toolbars root has no folders.
    pub(crate) fn root_empty(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            items: vec![
                MenuItem::Info(ROOT_EMPTY.to_string()),
                MenuItem::Info(root.display().to_string()),
                MenuItem::Control(ControlEntry::Separator),
                MenuItem::Control(ControlEntry::OpenInExplorer),
                MenuItem::Control(ControlEntry::Exit),
            ],
        }
    }

    /// File and folder entries, in menu order.
    pub fn entries(&self) -> impl Iterator<Item = &MenuEntry> {
        self.items.iter().filter_map(|item| match item {
            MenuItem::Entry(entry) => Some(entry),
            _ => None,
        })
    }

    /// Informational rows, in menu order.
    pub fn notices(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            MenuItem::Info(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Control rows, in menu order.
    pub fn controls(&self) -> impl Iterator<Item = ControlEntry> + '_ {
        self.items.iter().filter_map(|item| match item {
            MenuItem::Control(control) => Some(*control),
            _ => None,
        })
    }

    /// Rows actually shown for the given secondary visibility.
    pub fn visible_items(&self, secondary_visible: bool) -> impl Iterator<Item = &MenuItem> {
        self.items
            .iter()
            .filter(move |item| secondary_visible || !item.is_control())
    }

    /// Finds the entry (at either level) targeting `path`.
    pub fn find_entry(&self, path: &Path) -> Option<&MenuEntry> {
        self.entries().find_map(|entry| {
            if entry.path == path {
                Some(entry)
            } else {
                entry.children.iter().find(|child| child.path == path)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MenuModel {
        MenuModel::with_entries(
            Path::new("/t/Dev"),
            vec![
                MenuEntry::file("/t/Dev/run.exe".into(), "run".into(), None),
                MenuEntry::directory(
                    "/t/Dev/scripts".into(),
                    "scripts".into(),
                    None,
                    vec![MenuEntry::file("/t/Dev/scripts/a.bat".into(), "a".into(), None)],
                ),
            ],
        )
    }

    #[test]
    fn controls_trail_entries() {
        let model = sample();
        assert_eq!(model.items.len(), 6);
        assert!(matches!(model.items[0], MenuItem::Entry(_)));
        assert!(matches!(model.items[1], MenuItem::Entry(_)));
        assert_eq!(model.controls().collect::<Vec<_>>(), ControlEntry::ALL.to_vec());
    }

    #[test]
    fn notice_has_message_and_path() {
        let model = MenuModel::notice(Path::new("/t/Dev"), TOOLBAR_EMPTY);
        let path_text = Path::new("/t/Dev").display().to_string();
        let notices: Vec<&str> = model.notices().collect();
        assert_eq!(notices, vec![TOOLBAR_EMPTY, path_text.as_str()]);
        assert_eq!(model.entries().count(), 0);
        assert_eq!(model.controls().count(), 4);
    }

    #[test]
    fn visible_items_hide_controls() {
        let model = sample();
        assert_eq!(model.visible_items(false).count(), 2);
        assert!(model.visible_items(false).all(|i| !i.is_control()));
        assert_eq!(model.visible_items(true).count(), 6);
    }

    #[test]
    fn find_entry_searches_children() {
        let model = sample();
        assert_eq!(model.find_entry(Path::new("/t/Dev/scripts/a.bat")).unwrap().label, "a");
        assert_eq!(model.find_entry(Path::new("/t/Dev/run.exe")).unwrap().label, "run");
        assert!(model.find_entry(Path::new("/t/Dev/nope")).is_none());
    }

    #[test]
    fn control_actions() {
        assert_eq!(ControlEntry::Separator.action(), None);
        assert_eq!(ControlEntry::Update.action(), Some(MenuAction::Update));
        assert_eq!(ControlEntry::OpenInExplorer.action(), Some(MenuAction::OpenInExplorer));
        assert_eq!(ControlEntry::Exit.action(), Some(MenuAction::Exit));
        assert_eq!(ControlEntry::Separator.label(), "");
        assert_eq!(ControlEntry::Update.label(), "&Update");
        assert_eq!(ControlEntry::OpenInExplorer.label(), "&Open in Explorer");
        assert_eq!(ControlEntry::Exit.label(), "E&xit");
    }

    #[test]
    fn root_menus_keep_exit() {
        let missing = MenuModel::root_missing(Path::new("/home/ana/Toolbars"));
        assert_eq!(missing.notices().next(), Some(ROOT_MISSING));
        assert_eq!(
            missing.controls().collect::<Vec<_>>(),
            vec![ControlEntry::Separator, ControlEntry::Exit]
        );

        let empty = MenuModel::root_empty(Path::new("/home/ana/Toolbars"));
        assert_eq!(empty.notices().count(), 2);
        assert!(empty.controls().any(|c| c == ControlEntry::OpenInExplorer));
        assert!(!empty.controls().any(|c| c == ControlEntry::Update));
    }
}
