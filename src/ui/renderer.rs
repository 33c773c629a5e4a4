//! Terminal setup and the main event loop

use crate::api::RaceApi;
use crate::config::Config;
use crate::logger::Logger;
use crate::ui::app_component::AppComponent;
use crate::ui::core::{Component, EventHandler, EventType};
use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::sync::Arc;

/// Run the TUI until the user quits
pub async fn run_app(api: Arc<dyn RaceApi>, config: &Config, logger: Logger) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppComponent::new(api, config, logger);
    let mut event_handler = EventHandler::new();

    app.start();
    let result = run_app_loop(&mut terminal, &mut app, &mut event_handler).await;

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppComponent,
    event_handler: &mut EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let area = f.area();
            app.render(f, area);
        })?;

        let event = event_handler.next_event().await?;
        let is_tick = matches!(event, EventType::Tick);
        app.handle_event(event);

        // Results may already be waiting after a key press
        if !is_tick {
            app.tick();
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
