use super::app_logic::FavPane;
use super::app_state::PaneMode;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use std::time::Duration;

pub(super) fn handle_events(app: &mut FavPane) -> Result<()> {
    if event::poll(Duration::from_millis(50))? {
        if let Event::Key(key_event) = event::read()? {
            if key_event.kind == KeyEventKind::Press {
                match app.mode {
                    PaneMode::Normal => app.handle_normal_mode_input(key_event),
                    PaneMode::Filtering => app.handle_filtering_mode_input(key_event),
                    PaneMode::Picking => app.handle_picking_mode_input(key_event),
                }
            }
        }
    }
    Ok(())
}
