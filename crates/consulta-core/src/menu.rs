//! Account menu model
//!
//! Menu entries are plain data records so action wiring stays decoupled
//! from rendering: the TUI draws the list and dispatches on the action tag.

/// What a menu entry does when activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    OpenSettings,
    Logout,
}

/// One entry in the account dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub icon: &'static str,
    pub action: MenuAction,
}

/// Entries of the account dropdown, in display order
pub fn account_menu() -> &'static [MenuItem] {
    &[
        MenuItem {
            label: "Settings",
            icon: "⚙",
            action: MenuAction::OpenSettings,
        },
        MenuItem {
            label: "Logout",
            icon: "⏻",
            action: MenuAction::Logout,
        },
    ]
}
