//! Account dropdown menu
//!
//! Renders the `MenuItem` records from consulta-core under the header's
//! gear and dispatches the selected action tag back to the caller.

use crate::theme::Palette;
use consulta_core::{menu::account_menu, MenuAction};
use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

/// Dropdown state. Unlike the two modals, visibility lives on the dropdown
/// itself; it is transient chrome, not app view state.
pub struct MenuDropdown {
    visible: bool,
    state: ListState,
}

impl Default for MenuDropdown {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuDropdown {
    pub fn new() -> Self {
        let mut state = ListState::default();
        state.select(Some(0));
        Self {
            visible: false,
            state,
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.state.select(Some(0));
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Handle key input, returns Some(action) if an entry was activated
    pub fn handle_key(&mut self, key: KeyCode) -> Option<MenuAction> {
        if !self.visible {
            return None;
        }

        let items = account_menu();
        match key {
            KeyCode::Esc => {
                self.hide();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let next = self
                    .state
                    .selected()
                    .map(|i| (i + 1).min(items.len() - 1))
                    .unwrap_or(0);
                self.state.select(Some(next));
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let prev = self.state.selected().map(|i| i.saturating_sub(1)).unwrap_or(0);
                self.state.select(Some(prev));
                None
            }
            KeyCode::Enter => {
                let selected = self.state.selected()?;
                self.hide();
                items.get(selected).map(|item| item.action)
            }
            _ => None,
        }
    }

    /// Render anchored under the top-right corner of the header
    pub fn render(&mut self, frame: &mut Frame, area: Rect, palette: &Palette) {
        if !self.visible {
            return;
        }

        let items = account_menu();
        let width = 16u16;
        let height = items.len() as u16 + 2;
        let dropdown_area = Rect {
            x: area.x + area.width.saturating_sub(width + 1),
            y: area.y + 3,
            width: width.min(area.width),
            height: height.min(area.height),
        };

        frame.render_widget(Clear, dropdown_area);

        let list_items: Vec<ListItem> = items
            .iter()
            .map(|item| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{} ", item.icon),
                        Style::default().fg(palette.accent),
                    ),
                    Span::styled(item.label, Style::default().fg(palette.fg)),
                ]))
            })
            .collect();

        let list = List::new(list_items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.muted)),
            )
            .highlight_style(
                Style::default()
                    .bg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, dropdown_area, &mut self.state);
    }
}
