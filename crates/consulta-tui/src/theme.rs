//! Color palette for the consulta TUI
//!
//! One palette per color scheme so every component draws from the same
//! color language: green for success, red for errors/unread, yellow for
//! warnings, cyan for focus, gray for muted chrome.

use consulta_core::ColorScheme;
use ratatui::style::Color;

/// Semantic colors resolved for a color scheme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Palette {
    pub fn new(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Dark => Self {
                fg: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                success: Color::Green,
                warning: Color::Yellow,
                error: Color::Red,
            },
            ColorScheme::Light => Self {
                fg: Color::Black,
                muted: Color::Gray,
                accent: Color::Rgb(0, 128, 128),
                success: Color::Rgb(0, 128, 0),
                warning: Color::Rgb(180, 120, 0),
                error: Color::Rgb(200, 0, 0),
            },
        }
    }
}
