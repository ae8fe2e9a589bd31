//! Profile modal overlay
//!
//! Shows the decoded identity (name and role) with Edit and Close actions.
//! Edit navigates to the profile-edit view.

use crate::theme::Palette;
use consulta_core::Identity;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Action chosen inside the profile modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileAction {
    /// Go to the profile edit view
    Edit,
    /// Close the modal
    Close,
}

#[derive(Default)]
pub struct ProfileModal;

impl ProfileModal {
    pub fn new() -> Self {
        Self
    }

    /// Handle key input, returns Some(action) if a choice was made
    pub fn handle_key(&self, key: KeyCode) -> Option<ProfileAction> {
        match key {
            KeyCode::Char('e') | KeyCode::Char('E') => Some(ProfileAction::Edit),
            KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('C') => Some(ProfileAction::Close),
            _ => None,
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        identity: Option<&Identity>,
        palette: &Palette,
    ) {
        let modal_width = (area.width as f32 * 0.45).max(40.0) as u16;
        let modal_height = 9;
        let modal_area = Rect {
            x: area.x + (area.width.saturating_sub(modal_width)) / 2,
            y: area.y + (area.height.saturating_sub(modal_height)) / 2,
            width: modal_width.min(area.width),
            height: modal_height.min(area.height),
        };

        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .title(Span::styled(
                " Profile ",
                Style::default()
                    .fg(palette.fg)
                    .add_modifier(Modifier::BOLD),
            ));

        let (name, role) = match identity {
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
            Line::from(vec![
                Span::styled(
                    "[E] ",
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("Edit  ", Style::default().fg(palette.fg)),
                Span::styled(
                    "[Esc] ",
                    Style::default()
                        .fg(palette.muted)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("Close", Style::default().fg(palette.muted)),
            ]),
        ];

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, modal_area);
    }
}
