//! TUI Application state and event handling

use consulta_core::{
    ColorScheme, Inbox, ModalPolicy, Preferences, ProfileImageLoader, Session, SessionEvent,
};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::warn;

/// Active view of the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Console,
    Login,
    ProfileEdit,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Console => "Console",
            Route::Login => "Login",
            Route::ProfileEdit => "Edit Profile",
        }
    }
}

/// The two modal overlays of the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Notifications,
    Profile,
}

/// TUI Application state
pub struct App {
    /// Session context (injected, never read from globals)
    pub session: Arc<Session>,

    /// Profile image loader
    pub profile: Arc<ProfileImageLoader>,

    /// Notification inbox
    pub inbox: Inbox,

    /// Event receiver for session updates
    pub event_rx: broadcast::Receiver<SessionEvent>,

    /// Currently active view
    pub route: Route,

    /// Whether the navigation sidebar is folded
    pub sidebar_collapsed: bool,

    /// Notifications modal visibility
    pub notifications_visible: bool,

    /// Profile modal visibility
    pub profile_visible: bool,

    /// Whether both modals may be open at once
    pub modal_policy: ModalPolicy,

    /// Color scheme for rendering
    pub color_scheme: ColorScheme,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status line message
    pub status_message: Option<String>,
}

impl App {
    pub fn new(
        session: Arc<Session>,
        profile: Arc<ProfileImageLoader>,
        preferences: &Preferences,
    ) -> Self {
        let event_rx = session.event_bus().subscribe();
        let route = if session.is_logged_in() {
            Route::Console
        } else {
            Route::Login
        };

        Self {
            session,
            profile,
            inbox: Inbox::seed(),
            event_rx,
            route,
            sidebar_collapsed: false,
            notifications_visible: false,
            profile_visible: false,
            modal_policy: preferences.modal_policy,
            color_scheme: preferences.color_scheme,
            should_quit: false,
            status_message: None,
        }
    }

    /// Show a modal, applying the exclusivity policy. Idempotent.
    pub fn show(&mut self, modal: Modal) {
        if self.modal_policy == ModalPolicy::Exclusive {
            self.notifications_visible = false;
            self.profile_visible = false;
        }
        match modal {
            Modal::Notifications => self.notifications_visible = true,
            Modal::Profile => self.profile_visible = true,
        }
    }

    /// Hide a modal. Idempotent.
    pub fn hide(&mut self, modal: Modal) {
        match modal {
            Modal::Notifications => self.notifications_visible = false,
            Modal::Profile => self.profile_visible = false,
        }
    }

    /// Tear down the session and go to the login view
    pub fn logout(&mut self) {
        if let Err(e) = self.session.logout() {
            warn!("Logout failed: {e}");
            self.status_message = Some(format!("Logout failed: {}", e.summary()));
        }
    }

    /// Handle keyboard input for global keys
    /// Returns true if the key was handled
    pub fn handle_key(&mut self, key: crossterm::event::KeyCode) -> bool {
        use crossterm::event::KeyCode;

        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
                true
            }
            KeyCode::Char('t') => {
                self.sidebar_collapsed = !self.sidebar_collapsed;
                true
            }
            KeyCode::Char('n') if self.route == Route::Console => {
                self.show(Modal::Notifications);
                true
            }
            KeyCode::Char('p') if self.route == Route::Console => {
                self.show(Modal::Profile);
                true
            }
            _ => false,
        }
    }

    /// Check for session events (non-blocking)
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                SessionEvent::TokenChanged => {
                    self.route = Route::Console;
                    self.profile.reload(&self.session);
                }
                SessionEvent::LoggedOut => {
                    self.route = Route::Login;
                    self.notifications_visible = false;
                    self.profile_visible = false;
                    self.profile.reload(&self.session);
                }
                SessionEvent::ProfileImageLoaded => {
                    // Next draw reads the loader directly
                }
                SessionEvent::ProfileImageFailed(msg) => {
                    self.status_message = Some(format!("Profile image: {msg}"));
                }
            }
        }
    }
}
