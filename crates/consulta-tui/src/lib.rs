//! consulta-tui - TUI frontend for consulta using Ratatui

pub mod app;
pub mod components;
pub mod theme;
pub mod ui;

pub use app::App;

use anyhow::Result;
use consulta_core::{Preferences, ProfileImageLoader, Session};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Run the TUI application
pub async fn run(
    session: Arc<Session>,
    profile: Arc<ProfileImageLoader>,
    preferences: Preferences,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(session.clone(), profile.clone(), &preferences);
    let mut ui = ui::Ui::new();

    // Kick off the profile image fetch for the current token
    profile.reload(&session);

    let result = run_loop(&mut terminal, &mut app, &mut ui).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    ui: &mut ui::Ui,
) -> Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    loop {
        // Check for session events
        app.poll_events();

        // Draw UI
        terminal.draw(|f| ui.render(f, app))?;

        // Handle input with timeout for event polling
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    // Focused components and overlays first, then global keys
                    let handled = ui.handle_key(key.code, app);
                    if !handled {
                        app.handle_key(key.code);
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
