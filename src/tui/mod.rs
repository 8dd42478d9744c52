// Define structs and enums that are part of the public API of the TUI module
mod app_logic;
mod app_state;
mod event_handler;
mod ui_renderer;

// Re-export what workflow.rs needs to act on a finished session.
pub use app_state::PaneOutcome;

// The main function to run the TUI
pub use self::run_pane::run_favorites_pane;

// This module contains the main TUI loop and terminal setup/teardown
mod run_pane {
    use super::app_logic::FavPane;
    use super::app_state::PaneOutcome;
    use super::event_handler::handle_events;
    use super::ui_renderer::ui_frame;
    use crate::config::Store;
    use crate::favorites::FavoriteEntry;
    use anyhow::Result;
    use crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    };
    use ratatui::prelude::{CrosstermBackend, Terminal};
    use std::io::{self, Stdout};

    /// Runs the interactive pane over the given entries. The pane keeps
    /// editing the store (favorites, view preferences) while it runs;
    /// the caller decides when to save. An empty entry list is fine and
    /// shows the add-a-favorite placeholder.
    pub fn run_favorites_pane(
        store: &mut Store,
        entries: Vec<FavoriteEntry>,
    ) -> Result<PaneOutcome> {
        let mut app = FavPane::new(store, entries);

        let mut terminal = init_terminal()?;
        while !app.quit {
            // app.quit is pub(super)
            terminal.draw(|frame| ui_frame(frame, &mut app))?;
            handle_events(&mut app)?;
        }
        let outcome = app.outcome.clone();

        restore_terminal(terminal)?;
        Ok(outcome)
    }

    fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor().map_err(Into::into)
    }
}
