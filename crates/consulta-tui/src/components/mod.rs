//! Reusable TUI components

pub mod header;
pub mod menu_dropdown;
pub mod notifications_modal;
pub mod profile_modal;
pub mod search_bar;

pub use header::HeaderBar;
pub use menu_dropdown::MenuDropdown;
pub use notifications_modal::{NotificationsAction, NotificationsModal};
pub use profile_modal::{ProfileAction, ProfileModal};
pub use search_bar::SearchBar;
