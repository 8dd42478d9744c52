use super::app_logic::FavPane;
use super::app_state::PaneMode;
use crate::config::ViewMode;
use crate::display;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

fn highlight_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray)
}

fn draw_help_block(f: &mut Frame, app: &FavPane, area: Rect) {
    let help_text_lines_content = if app.mode == PaneMode::Picking {
        vec![
            Line::from("Arrows/jk: Nav | Enter/l: Open dir | h/Backspace: Up | Space: Add highlighted"),
            Line::from("a: Add listed dir | .: Toggle hidden | Esc/q: Cancel"),
        ]
    } else {
        vec![
            Line::from("Arrows/jk/hl: Nav | Enter: Open | Space: Mark | y: Yank | d: Remove | /: Search"),
            Line::from("a: Add favorite | v: List/Grid | +/-: Zoom | r: Refresh | q/Esc: Quit"),
        ]
    };
    let help_paragraph = Paragraph::new(help_text_lines_content)
        .block(Block::default().borders(Borders::ALL).title("Favpane"));
    f.render_widget(help_paragraph, area);
}

fn draw_filter_input_block(f: &mut Frame, app: &FavPane, area: Rect) {
    let input_text = format!("/{}", app.filter_input);
    let filter_paragraph = Paragraph::new(input_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search (Esc to clear, Enter to keep)"),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(filter_paragraph, area);
    f.set_cursor_position((area.x + 1 + app.filter_cursor_column() as u16 + 1, area.y + 1));
}

fn draw_entries_block(f: &mut Frame, app: &mut FavPane, area: Rect) {
    app.viewport_rows = area.height.saturating_sub(2) as usize;
    app.ensure_cursor_visible();

    let title = if !app.filter_input.is_empty() && app.mode == PaneMode::Normal {
        format!("Favorites (filter: '{}')", app.filter_input)
    } else {
        "Favorites".to_string()
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if app.filtered.is_empty() {
        let message = if app.filter_input.is_empty() {
            "No favorites yet. Press 'a' to add one."
        } else {
            "No favorites match the search."
        };
        let placeholder = Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(placeholder, area);
        return;
    }

    match app.store.settings().view_mode {
        ViewMode::List => draw_list(f, app, block, area),
        ViewMode::Grid => draw_grid(f, app, block, area),
    }
}

fn draw_list(f: &mut Frame, app: &FavPane, block: Block, area: Rect) {
    let start = app.scroll_offset;
    let end = (start + app.viewport_rows).min(app.filtered.len());
    let window = app.filtered.get(start..end).unwrap_or(&[]);

    // Name column takes what the meta and date columns leave over.
    let name_width = (area.width as usize).saturating_sub(38).max(12);
    let list_items: Vec<ListItem> = window
        .iter()
        .map(|entry| {
            let mark_prefix = if app.marked.contains(&entry.path) {
                "[*] "
            } else {
                "[ ] "
            };
            let line = format!(
                "{}{:<name_width$} {:>9}  {}",
                mark_prefix,
                display::fit_cell(&display::entry_label(entry), name_width),
                display::entry_meta(entry),
                display::format_modified(&entry.modified),
            );
            ListItem::new(line)
        })
        .collect();

    let list_widget = List::new(list_items)
        .block(block)
        .highlight_style(highlight_style())
        .highlight_symbol("❯ ");

    let mut list_state_for_view = ListState::default();
    if app.cursor >= start && app.cursor < end {
        list_state_for_view.select(Some(app.cursor - start));
    }
    f.render_stateful_widget(list_widget, area, &mut list_state_for_view);
}

fn draw_grid(f: &mut Frame, app: &FavPane, block: Block, area: Rect) {
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let cols = app.store.settings().column_count.max(1) as usize;
    let cell_width = inner.width / cols as u16;
    if cell_width == 0 {
        return;
    }

    let first = app.scroll_offset * cols;
    for slot in 0..(inner.height as usize * cols) {
        let idx = first + slot;
        if idx >= app.filtered.len() {
            break;
        }
        let entry = &app.filtered[idx];
        let row = (slot / cols) as u16;
        let col = (slot % cols) as u16;
        let cell = Rect::new(inner.x + col * cell_width, inner.y + row, cell_width, 1);

        let mark = if app.marked.contains(&entry.path) { "*" } else { " " };
        let text = format!(
            "{}{}",
            mark,
            display::fit_cell(
                &display::entry_label(entry),
                cell_width.saturating_sub(2) as usize
            )
        );
        let style = if idx == app.cursor {
            highlight_style()
        } else {
            Style::default()
        };
        f.render_widget(Paragraph::new(text).style(style), cell);
    }
}

fn draw_picker_block(f: &mut Frame, app: &FavPane, area: Rect) {
    let Some(picker) = app.picker.as_ref() else {
        return;
    };

    let mut title = format!("Add favorite: {}", display::shorten_path(&picker.current_dir));
    if picker.show_hidden {
        title.push_str(" (hidden shown)");
    }
    let block = Block::default().borders(Borders::ALL).title(title);

    if picker.entries.is_empty() {
        let placeholder = Paragraph::new("No subdirectories. Press 'a' to add this directory.")
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(placeholder, area);
        return;
    }

    let list_items: Vec<ListItem> = picker
        .entries
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            ListItem::new(format!("{}/", name))
        })
        .collect();

    let list_widget = List::new(list_items)
        .block(block)
        .highlight_style(highlight_style())
        .highlight_symbol("❯ ");

    // ListState keeps the selection scrolled into view on its own.
    let mut list_state_for_view = ListState::default();
    list_state_for_view.select(Some(picker.cursor));
    f.render_stateful_widget(list_widget, area, &mut list_state_for_view);
}

pub(super) fn ui_frame(frame: &mut Frame, app: &mut FavPane) {
    let help_lines = 2;
    let filter_input_height = if app.mode == PaneMode::Filtering { 3 } else { 0 };
    let top_block_container_height = (help_lines + 2) + filter_input_height;

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(top_block_container_height),
            Constraint::Min(0),
        ])
        .split(frame.area());

    let top_container_area = main_chunks[0];
    let entries_area = main_chunks[1];

    let top_content_constraints = if app.mode == PaneMode::Filtering {
        vec![
            Constraint::Length(help_lines + 2),
            Constraint::Length(filter_input_height),
        ]
    } else {
        vec![Constraint::Length(help_lines + 2)]
    };
    let top_content_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(top_content_constraints)
        .split(top_container_area);

    draw_help_block(frame, app, top_content_chunks[0]);
    if app.mode == PaneMode::Filtering {
        draw_filter_input_block(frame, app, top_content_chunks[1]);
    }

    if app.mode == PaneMode::Picking {
        draw_picker_block(frame, app, entries_area);
    } else {
        draw_entries_block(frame, app, entries_area);
    }
}
