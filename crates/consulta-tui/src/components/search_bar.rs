use crate::theme::Palette;
use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Search box in the header bar
///
/// Focused with `/`; while focused it consumes character input and filters
/// the notification list. Esc or Enter blurs it.
pub struct SearchBar {
    /// Current search query
    pub query: String,
    /// Whether the search box has input focus
    pub active: bool,
    /// Placeholder text when empty
    pub placeholder: String,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            active: false,
            placeholder: "Search...".to_string(),
        }
    }

    pub fn focus(&mut self) {
        self.active = true;
    }

    pub fn blur(&mut self) {
        self.active = false;
    }

    pub fn clear(&mut self) {
        self.query.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Handle key input while focused. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        if !self.active {
            return false;
        }

        match key {
            KeyCode::Esc => {
                self.clear();
                self.blur();
                true
            }
            KeyCode::Enter => {
                self.blur();
                true
            }
            KeyCode::Backspace => {
                self.query.pop();
                true
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                true
            }
            _ => false,
        }
    }

    /// Render the search box
    pub fn render(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let (text, style) = if self.query.is_empty() {
            (self.placeholder.as_str(), Style::default().fg(palette.muted))
        } else {
            (self.query.as_str(), Style::default().fg(palette.fg))
        };

        let border_color = if self.active {
            palette.accent
        } else {
            palette.muted
        };

        let search_line = Line::from(vec![
            Span::styled("🔍 ", Style::default().fg(palette.accent)),
            Span::styled(text, style),
            if self.active {
                Span::styled(
                    "_",
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::SLOW_BLINK),
                )
            } else {
                Span::raw("")
            },
        ]);

        let paragraph = Paragraph::new(search_line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );

        frame.render_widget(paragraph, area);
    }
}
