//! TUI rendering logic

use crate::app::{App, Modal, Route};
use crate::components::{
    HeaderBar, MenuDropdown, NotificationsAction, NotificationsModal, ProfileAction, ProfileModal,
};
use crate::theme::Palette;
use consulta_core::MenuAction;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Main UI renderer
pub struct Ui {
    header: HeaderBar,
    notifications: NotificationsModal,
    profile_modal: ProfileModal,
    menu: MenuDropdown,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui {
    pub fn new() -> Self {
        Self {
            header: HeaderBar::new(),
            notifications: NotificationsModal::new(),
            profile_modal: ProfileModal::new(),
            menu: MenuDropdown::new(),
        }
    }

    /// Handle key input for focused components and overlays
    /// Returns true if the key was consumed
    pub fn handle_key(&mut self, key: KeyCode, app: &mut App) -> bool {
        // Search box swallows input while focused
        if self.header.search.active {
            return self.header.search.handle_key(key);
        }

        // Dropdown takes precedence over modals
        if self.menu.is_visible() {
            if let Some(action) = self.menu.handle_key(key) {
                match action {
                    MenuAction::OpenSettings => {
                        app.status_message =
                            Some("Settings live in preferences.json".to_string());
                    }
                    MenuAction::Logout => app.logout(),
                }
            }
            return true;
        }

        // When both modals are open, notifications has key focus
        if app.notifications_visible {
            let action = {
                let visible = app.inbox.filter(&self.header.search.query);
                self.notifications.handle_key(key, &visible)
            };
            match action {
                Some(NotificationsAction::ToggleRead(id)) => {
                    app.inbox.toggle_read(id);
                }
                Some(NotificationsAction::Close) => app.hide(Modal::Notifications),
                None => {}
            }
            return true;
        }

        if app.profile_visible {
            match self.profile_modal.handle_key(key) {
                Some(ProfileAction::Edit) => {
                    app.hide(Modal::Profile);
                    app.route = Route::ProfileEdit;
                }
                Some(ProfileAction::Close) => app.hide(Modal::Profile),
                None => {}
            }
            return true;
        }

        if app.route == Route::ProfileEdit && key == KeyCode::Esc {
            app.route = Route::Console;
            return true;
        }

        match key {
            KeyCode::Char('/') if app.route == Route::Console => {
                self.header.search.focus();
                true
            }
            KeyCode::Char('m') if app.route == Route::Console => {
                self.menu.show();
                true
            }
            _ => false,
        }
    }

    /// Draw the full frame: header, route body, footer, then overlays
    pub fn render(&mut self, frame: &mut Frame, app: &App) {
        let palette = Palette::new(app.color_scheme);
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header bar
                Constraint::Min(0),    // Body
                Constraint::Length(1), // Footer
            ])
            .split(area);

        self.header.render(frame, chunks[0], app);

        match app.route {
            Route::Console => self.render_console(frame, chunks[1], app, &palette),
            Route::Login => self.render_login(frame, chunks[1], &palette),
            Route::ProfileEdit => self.render_profile_edit(frame, chunks[1], app, &palette),
        }

        self.render_footer(frame, chunks[2], app, &palette);

        // Overlays last so they paint over the body
        self.render_overlays(frame, area, app, &palette);
    }

    fn render_overlays(&mut self, frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
        if app.notifications_visible {
            self.notifications
                .render(frame, area, &app.inbox, &self.header.search.query, palette);
        }
        if app.profile_visible {
            let identity = app.session.identity();
            self.profile_modal
                .render(frame, area, identity.as_ref(), palette);
        }
        self.menu.render(frame, area, palette);
    }

    fn render_console(&self, frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
        let body = if app.sidebar_collapsed {
            area
        } else {
            let split = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(18), Constraint::Min(0)])
                .split(area);
            self.render_sidebar(frame, split[0], palette);
            split[1]
        };

        let unread = app.inbox.unread_count();
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{unread} unread notification(s)"),
                Style::default().fg(if unread > 0 {
                    palette.warning
                } else {
                    palette.muted
                }),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press n for notifications, p for profile, m for the account menu",
                Style::default().fg(palette.muted),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Console ")
                    .border_style(Style::default().fg(palette.muted)),
            );
        frame.render_widget(paragraph, body);
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let lines = vec![
            Line::from(Span::styled(
                "Dashboard",
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("Patients", Style::default().fg(palette.fg))),
            Line::from(Span::styled("Doctors", Style::default().fg(palette.fg))),
            Line::from(Span::styled(
                "Appointments",
                Style::default().fg(palette.fg),
            )),
        ];
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.muted)),
        );
        frame.render_widget(paragraph, area);
    }

    fn render_login(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Not signed in",
                Style::default()
                    .fg(palette.warning)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Run: consulta login <token>",
                Style::default().fg(palette.fg),
            )),
            Line::from(Span::styled(
                "then restart the console",
                Style::default().fg(palette.muted),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Login ")
                    .border_style(Style::default().fg(palette.warning)),
            );
        frame.render_widget(paragraph, area);
    }

    fn render_profile_edit(&self, frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
        let identity = app.session.identity();
        let (name, role) = match &identity {
            Some(id) => (id.name.as_str(), id.role.as_str()),
            None => ("—", "—"),
        };

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("Name  ", Style::default().fg(palette.muted)),
                Span::styled(name, Style::default().fg(palette.fg)),
            ]),
            Line::from(vec![
                Span::styled("Role  ", Style::default().fg(palette.muted)),
                Span::styled(role, Style::default().fg(palette.fg)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Profile editing is handled by the clinic backoffice",
                Style::default().fg(palette.muted),
            )),
            Line::from(Span::styled(
                "Esc to return",
                Style::default().fg(palette.muted),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", Route::ProfileEdit.name()))
                    .border_style(Style::default().fg(palette.accent)),
            );
        frame.render_widget(paragraph, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
        let line = match &app.status_message {
            Some(msg) => Line::from(Span::styled(
                format!(" {msg}"),
                Style::default().fg(palette.warning),
            )),
            None => Line::from(Span::styled(
                " q quit  / search  n notifications  p profile  m menu  t sidebar",
                Style::default().fg(palette.muted),
            )),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consulta_core::{EventBus, ModalPolicy, Preferences, ProfileClient, ProfileImageLoader, Session};
    use std::sync::Arc;

    fn make_app() -> App {
        let session = Arc::new(Session::new(Some("tok".to_string()), None));
        let client = ProfileClient::new("http://localhost:3000").unwrap();
        let profile = Arc::new(ProfileImageLoader::new(client, EventBus::default_capacity()));
        let preferences = Preferences {
            modal_policy: ModalPolicy::Independent,
            ..Preferences::default()
        };
        App::new(session, profile, &preferences)
    }

    #[tokio::test]
    async fn test_slash_focuses_search() {
        let mut ui = Ui::new();
        let mut app = make_app();
        assert!(ui.handle_key(KeyCode::Char('/'), &mut app));
        assert!(ui.header.search.active);
        // While focused, 'q' is input, not quit
        assert!(ui.handle_key(KeyCode::Char('q'), &mut app));
        assert!(!app.should_quit);
        assert_eq!(ui.header.search.query, "q");
    }

    #[tokio::test]
    async fn test_menu_logout_flow() {
        let mut ui = Ui::new();
        let mut app = make_app();
        assert!(ui.handle_key(KeyCode::Char('m'), &mut app));
        ui.handle_key(KeyCode::Down, &mut app);
        ui.handle_key(KeyCode::Enter, &mut app);
        app.poll_events();
        assert_eq!(app.route, Route::Login);
        assert!(app.session.identity().is_none());
    }

    #[tokio::test]
    async fn test_notifications_modal_toggle_flow() {
        let mut ui = Ui::new();
        let mut app = make_app();
        app.show(Modal::Notifications);

        ui.handle_key(KeyCode::Down, &mut app);
        ui.handle_key(KeyCode::Enter, &mut app);
        assert_eq!(app.inbox.unread_count(), 2);

        ui.handle_key(KeyCode::Esc, &mut app);
        assert!(!app.notifications_visible);
    }

    #[tokio::test]
    async fn test_profile_edit_navigation() {
        let mut ui = Ui::new();
        let mut app = make_app();
        app.show(Modal::Profile);

        ui.handle_key(KeyCode::Char('e'), &mut app);
        assert!(!app.profile_visible);
        assert_eq!(app.route, Route::ProfileEdit);

        ui.handle_key(KeyCode::Esc, &mut app);
        assert_eq!(app.route, Route::Console);
    }

    #[tokio::test]
    async fn test_unhandled_key_falls_through() {
        let mut ui = Ui::new();
        let mut app = make_app();
        assert!(!ui.handle_key(KeyCode::Char('q'), &mut app));
    }
}
