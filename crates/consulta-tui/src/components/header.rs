//! Header bar component
//!
//! Renders the top bar of the shell: sidebar fold indicator, logo, search
//! box, then the identity cluster (avatar, name and role, unread badge,
//! account gear).

use crate::app::App;
use crate::components::SearchBar;
use crate::theme::Palette;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Header bar with embedded search box
#[derive(Default)]
pub struct HeaderBar {
    pub search: SearchBar,
}

impl HeaderBar {
    pub fn new() -> Self {
        Self {
            search: SearchBar::new(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let palette = Palette::new(app.color_scheme);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(18), // Fold indicator + logo
                Constraint::Length(28), // Search box
                Constraint::Min(0),     // Identity cluster, right-aligned
            ])
            .split(area);

        self.render_logo(frame, chunks[0], app, &palette);
        self.search.render(frame, chunks[1], &palette);
        self.render_identity(frame, chunks[2], app, &palette);
    }

    fn render_logo(&self, frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
        let fold_glyph = if app.sidebar_collapsed { "»" } else { "«" };
        let line = Line::from(vec![
            Span::styled(format!(" {fold_glyph} "), Style::default().fg(palette.muted)),
            Span::styled("♥ ", Style::default().fg(palette.error)),
            Span::styled(
                "ConsultaMed",
                Style::default()
                    .fg(palette.fg)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }

    fn render_identity(&self, frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
        let identity = app.session.identity();
        let image_loaded = app.profile.image_url().is_some();
        let unread = app.inbox.unread_count();

        let mut spans: Vec<Span> = Vec::new();

        // Avatar: image indicator when loaded, initials otherwise,
        // generic placeholder when logged out
        let avatar_style = if image_loaded {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)
        };
        match &identity {
            Some(id) => {
                let glyph = if image_loaded { "◉" } else { "○" };
                spans.push(Span::styled(
                    format!("{glyph} {} ", id.initials()),
                    avatar_style,
                ));
                spans.push(Span::styled(&id.name, Style::default().fg(palette.fg)));
                spans.push(Span::styled(
                    format!(" ({}) ", id.role),
                    Style::default().fg(palette.muted),
                ));
            }
            None => {
                spans.push(Span::styled("○ ? ", Style::default().fg(palette.muted)));
                spans.push(Span::styled(
                    "not signed in ",
                    Style::default().fg(palette.muted),
                ));
            }
        }

        // Unread badge
        let badge_style = if unread > 0 {
            Style::default()
                .fg(palette.error)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        spans.push(Span::styled(format!(" 🔔{unread} "), badge_style));

        // Account gear
        spans.push(Span::styled(" ⚙ ", Style::default().fg(palette.muted)));

        let paragraph = Paragraph::new(Line::from(spans))
            .alignment(ratatui::layout::Alignment::Right)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }
}
