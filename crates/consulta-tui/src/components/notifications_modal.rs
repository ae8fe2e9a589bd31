//! Notifications modal overlay
//!
//! Centered list of notification entries; Enter toggles the selected
//! entry's read flag, Esc closes. Read entries render dimmed with an open
//! marker, unread ones bold with a filled marker.

use crate::theme::Palette;
use consulta_core::{Inbox, Notification};
use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Action chosen inside the modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationsAction {
    /// Toggle the read flag of the entry with this id
    ToggleRead(u32),
    /// Close the modal
    Close,
}

/// Selection state of the notifications modal (visibility lives on App)
#[derive(Default)]
pub struct NotificationsModal {
    state: ListState,
}

impl NotificationsModal {
    pub fn new() -> Self {
        Self {
            state: ListState::default(),
        }
    }

    /// Handle key input, returns Some(action) if a choice was made
    pub fn handle_key(&mut self, key: KeyCode, visible: &[&Notification]) -> Option<NotificationsAction> {
        match key {
            KeyCode::Esc => Some(NotificationsAction::Close),
            KeyCode::Down | KeyCode::Char('j') => {
                let next = match self.state.selected() {
                    Some(i) if i + 1 < visible.len() => i + 1,
                    Some(i) => i,
                    None => 0,
                };
                if !visible.is_empty() {
                    self.state.select(Some(next));
                }
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let prev = self.state.selected().map(|i| i.saturating_sub(1)).unwrap_or(0);
                if !visible.is_empty() {
                    self.state.select(Some(prev));
                }
                None
            }
            KeyCode::Enter => {
                let selected = self.state.selected()?;
                visible
                    .get(selected)
                    .map(|n| NotificationsAction::ToggleRead(n.id))
            }
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, inbox: &Inbox, query: &str, palette: &Palette) {
        let visible = inbox.filter(query);

        // Keep the selection inside the filtered list
        if let Some(selected) = self.state.selected() {
            if selected >= visible.len() {
                self.state.select(if visible.is_empty() {
                    None
                } else {
                    Some(visible.len() - 1)
                });
            }
        }

        let modal_width = (area.width as f32 * 0.6).max(44.0) as u16;
        let modal_height = (visible.len() as u16 + 5).max(8);
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
                format!(" Notifications ({} unread) ", inbox.unread_count()),
                Style::default()
                    .fg(palette.fg)
                    .add_modifier(Modifier::BOLD),
            ));

        let items: Vec<ListItem> = visible
            .iter()
            .map(|n| {
                let (marker, style) = if n.read {
                    ("○", Style::default().fg(palette.muted))
                } else {
                    (
                        "●",
                        Style::default()
                            .fg(palette.fg)
                            .add_modifier(Modifier::BOLD),
                    )
                };
                let marker_style = if n.read {
                    Style::default().fg(palette.success)
                } else {
                    Style::default().fg(palette.error)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{marker} "), marker_style),
                    Span::styled(n.message.clone(), style),
                ]))
            })
            .collect();

        if items.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No notifications match",
                Style::default().fg(palette.muted),
            )))
            .block(block)
            .alignment(ratatui::layout::Alignment::Center);
            frame.render_widget(empty, modal_area);
            return;
        }

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, modal_area, &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(inbox: &Inbox) -> Vec<&Notification> {
        inbox.entries().iter().collect()
    }

    #[test]
    fn test_esc_closes() {
        let inbox = Inbox::seed();
        let mut modal = NotificationsModal::new();
        assert_eq!(
            modal.handle_key(KeyCode::Esc, &entries(&inbox)),
            Some(NotificationsAction::Close)
        );
    }

    #[test]
    fn test_enter_without_selection_does_nothing() {
        let inbox = Inbox::seed();
        let mut modal = NotificationsModal::new();
        assert_eq!(modal.handle_key(KeyCode::Enter, &entries(&inbox)), None);
    }

    #[test]
    fn test_navigate_and_toggle() {
        let inbox = Inbox::seed();
        let mut modal = NotificationsModal::new();
        let visible = entries(&inbox);

        modal.handle_key(KeyCode::Down, &visible);
        modal.handle_key(KeyCode::Down, &visible);
        assert_eq!(
            modal.handle_key(KeyCode::Enter, &visible),
            Some(NotificationsAction::ToggleRead(2))
        );
    }

    #[test]
    fn test_selection_stops_at_end() {
        let inbox = Inbox::seed();
        let mut modal = NotificationsModal::new();
        let visible = entries(&inbox);

        for _ in 0..10 {
            modal.handle_key(KeyCode::Down, &visible);
        }
        assert_eq!(
            modal.handle_key(KeyCode::Enter, &visible),
            Some(NotificationsAction::ToggleRead(3))
        );
    }
}
