//! consulta-core - Core library for consulta
//!
//! Provides the session context, profile image loader, notification inbox,
//! and account menu model for the console shell.

pub mod error;
pub mod event;
pub mod menu;
pub mod notifications;
pub mod preferences;
pub mod profile;
pub mod session;
pub mod token_store;

pub use error::CoreError;
pub use event::{EventBus, SessionEvent};
pub use menu::{MenuAction, MenuItem};
pub use notifications::{Inbox, Notification};
pub use preferences::{ColorScheme, ModalPolicy, Preferences};
pub use profile::{ProfileClient, ProfileImageLoader};
pub use session::{decode_identity, Identity, Session};
pub use token_store::TokenStore;
