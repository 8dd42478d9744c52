use super::app_state::{PaneMode, PaneOutcome, PickerState};
use crate::config::{MAX_COLUMN_COUNT, Store, ViewMode};
use crate::favorites::{self, FavoriteEntry};
use crate::picker;
use crate::search;
use crossterm::event::{KeyCode, KeyEvent};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Interactive state of the favorites pane. View preferences (layout,
/// column count) are read from and written straight to the store, so
/// they survive the session once the caller saves it.
pub struct FavPane<'a> {
    pub(super) store: &'a mut Store,
    /// Unfiltered entries, refreshed from disk on reload.
    pub(super) entries: Vec<FavoriteEntry>,
    /// What the pane currently shows; recomputed from `entries`
    /// whenever the query changes or the list is reloaded.
    pub(super) filtered: Vec<FavoriteEntry>,
    /// Index into `filtered`.
    pub(super) cursor: usize,
    /// First visible row (grid rows; a list is a one-column grid).
    pub(super) scroll_offset: usize,
    pub(super) marked: HashSet<PathBuf>,
    pub(super) mode: PaneMode,
    pub(super) filter_input: String,
    /// Byte offset into `filter_input`, always on a char boundary.
    pub(super) filter_cursor_pos: usize,
    pub(super) picker: Option<PickerState>,
    /// Rows the entry area can show; updated by the renderer.
    pub(super) viewport_rows: usize,
    pub(super) quit: bool,
    pub(super) outcome: PaneOutcome,
}

impl<'a> FavPane<'a> {
    pub fn new(store: &'a mut Store, entries: Vec<FavoriteEntry>) -> Self {
        let filtered = entries.clone();
        FavPane {
            store,
            entries,
            filtered,
            cursor: 0,
            scroll_offset: 0,
            marked: HashSet::new(),
            mode: PaneMode::Normal,
            filter_input: String::new(),
            filter_cursor_pos: 0,
            picker: None,
            viewport_rows: 0,
            quit: false,
            outcome: PaneOutcome::Cancelled,
        }
    }

    // --- Filtering ---

    pub(super) fn apply_filter(&mut self) {
        self.filtered = search::filter_entries(&self.entries, &self.filter_input);
        if self.cursor >= self.filtered.len() {
            self.cursor = 0;
        }
        self.ensure_cursor_visible();
    }

    /// Re-reads the favorites from the store and the filesystem,
    /// keeping the active query applied.
    pub(super) fn reload(&mut self) {
        self.entries = favorites::materialize(&self.store.settings().favorites);
        // Marks on entries that disappeared would otherwise linger.
        self.marked.retain(|p| self.entries.iter().any(|e| e.path == *p));
        self.apply_filter();
    }

    /// Manual refresh is only available when no search is narrowing the
    /// view and the user has not switched refreshing off.
    pub(super) fn refresh_enabled(&self) -> bool {
        self.filter_input.is_empty() && self.store.settings().pull_to_refresh
    }

    pub(super) fn request_refresh(&mut self) {
        if self.refresh_enabled() {
            self.reload();
        }
    }

    /// Char column of the filter cursor, for terminal cursor placement.
    pub(super) fn filter_cursor_column(&self) -> usize {
        self.filter_input[..self.filter_cursor_pos].chars().count()
    }

    // --- Layout and navigation ---

    fn effective_columns(&self) -> usize {
        match self.store.settings().view_mode {
            ViewMode::Grid => self.store.settings().column_count.max(1) as usize,
            ViewMode::List => 1,
        }
    }

    pub(super) fn move_vertical(&mut self, delta: i32) {
        match self.store.settings().view_mode {
            ViewMode::List => self.step_cursor(delta),
            ViewMode::Grid => self.jump_cursor_by_row(delta),
        }
    }

    /// Horizontal movement only means something in the grid.
    pub(super) fn move_horizontal(&mut self, delta: i32) {
        if self.store.settings().view_mode == ViewMode::Grid {
            self.step_cursor(delta);
        }
    }

    fn step_cursor(&mut self, delta: i32) {
        if self.filtered.is_empty() {
            return;
        }
        let len = self.filtered.len() as i32;
        self.cursor = (self.cursor as i32 + delta).rem_euclid(len) as usize;
        self.ensure_cursor_visible();
    }

    /// Moves a full grid row up or down; stops at the edges instead of
    /// wrapping so a jump never lands on an unrelated cell.
    fn jump_cursor_by_row(&mut self, delta: i32) {
        if self.filtered.is_empty() {
            return;
        }
        let cols = self.effective_columns() as i32;
        let target = self.cursor as i32 + delta * cols;
        if target >= 0 && (target as usize) < self.filtered.len() {
            self.cursor = target as usize;
            self.ensure_cursor_visible();
        }
    }

    pub(super) fn ensure_cursor_visible(&mut self) {
        if self.viewport_rows == 0 || self.filtered.is_empty() {
            self.scroll_offset = 0;
            return;
        }
        let cols = self.effective_columns();
        let total_rows = self.filtered.len().div_ceil(cols);
        let cursor_row = self.cursor / cols;

        if cursor_row < self.scroll_offset {
            self.scroll_offset = cursor_row;
        } else if cursor_row >= self.scroll_offset + self.viewport_rows {
            self.scroll_offset = cursor_row + 1 - self.viewport_rows;
        }
        if total_rows <= self.viewport_rows {
            self.scroll_offset = 0;
        } else {
            self.scroll_offset = self.scroll_offset.min(total_rows - self.viewport_rows);
        }
    }

    // --- View preferences (written straight to the store) ---

    pub(super) fn toggle_view_mode(&mut self) {
        let settings = self.store.settings_mut();
        settings.view_mode = match settings.view_mode {
            ViewMode::List => ViewMode::Grid,
            ViewMode::Grid => ViewMode::List,
        };
        self.scroll_offset = 0;
        self.ensure_cursor_visible();
    }

    /// Zooming in means bigger cells, i.e. fewer columns. Does nothing
    /// in list view or once a single column is reached.
    pub(super) fn zoom_in(&mut self) {
        let settings = self.store.settings_mut();
        if settings.view_mode == ViewMode::Grid && settings.column_count > 1 {
            settings.column_count -= 1;
            self.ensure_cursor_visible();
        }
    }

    /// Zooming out packs more columns in, up to [`MAX_COLUMN_COUNT`].
    pub(super) fn zoom_out(&mut self) {
        let settings = self.store.settings_mut();
        if settings.view_mode == ViewMode::Grid && settings.column_count < MAX_COLUMN_COUNT {
            settings.column_count += 1;
            self.ensure_cursor_visible();
        }
    }

    // --- Marking and acting on entries ---

    pub(super) fn toggle_mark(&mut self) {
        let Some(entry) = self.filtered.get(self.cursor) else {
            return;
        };
        let path = entry.path.clone();
        if !self.marked.remove(&path) {
            self.marked.insert(path);
        }
    }

    /// The marked entries in display order, or the one under the cursor
    /// when nothing is marked.
    fn marked_or_current(&self) -> Vec<PathBuf> {
        if self.marked.is_empty() {
            return self
                .filtered
                .get(self.cursor)
                .map(|e| vec![e.path.clone()])
                .unwrap_or_default();
        }
        self.entries
            .iter()
            .filter(|e| self.marked.contains(&e.path))
            .map(|e| e.path.clone())
            .collect()
    }

    pub(super) fn confirm_current(&mut self) {
        let Some(entry) = self.filtered.get(self.cursor) else {
            return;
        };
        self.outcome = PaneOutcome::Open(entry.path.clone());
        self.quit = true;
    }

    pub(super) fn yank_marked_or_current(&mut self) {
        let targets = self.marked_or_current();
        if targets.is_empty() {
            return;
        }
        self.outcome = PaneOutcome::Yank(targets);
        self.quit = true;
    }

    /// Drops the marked (or current) entries from the favorites and
    /// reloads. The paths on disk are never touched.
    pub(super) fn remove_marked_or_current(&mut self) {
        let targets = self.marked_or_current();
        if targets.is_empty() {
            return;
        }
        for path in &targets {
            self.store.remove_favorite(&path.to_string_lossy());
        }
        self.marked.clear();
        self.reload();
    }

    // --- Directory picker ---

    pub(super) fn open_picker(&mut self) {
        let start = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
        self.open_picker_at(start);
    }

    pub(super) fn open_picker_at(&mut self, start: PathBuf) {
        let show_hidden = self.store.settings().show_hidden;
        self.picker = Some(PickerState {
            entries: picker::list_dirs(&start, show_hidden),
            current_dir: start,
            cursor: 0,
            show_hidden,
        });
        self.mode = PaneMode::Picking;
    }

    pub(super) fn close_picker(&mut self) {
        self.picker = None;
        self.mode = PaneMode::Normal;
    }

    fn picker_step(&mut self, delta: i32) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        if picker.entries.is_empty() {
            return;
        }
        let len = picker.entries.len() as i32;
        picker.cursor = (picker.cursor as i32 + delta).rem_euclid(len) as usize;
    }

    fn picker_descend(&mut self) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        let Some(target) = picker.entries.get(picker.cursor).cloned() else {
            return;
        };
        picker.entries = picker::list_dirs(&target, picker.show_hidden);
        picker.current_dir = target;
        picker.cursor = 0;
    }

    fn picker_ascend(&mut self) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        let Some(parent) = picker.current_dir.parent().map(Path::to_path_buf) else {
            return;
        };
        let came_from = picker.current_dir.clone();
        picker.entries = picker::list_dirs(&parent, picker.show_hidden);
        picker.current_dir = parent;
        // Land on the directory we just left.
        picker.cursor = picker
            .entries
            .iter()
            .position(|p| *p == came_from)
            .unwrap_or(0);
    }

    fn picker_toggle_hidden(&mut self) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        picker.show_hidden = !picker.show_hidden;
        picker.entries = picker::list_dirs(&picker.current_dir, picker.show_hidden);
        picker.cursor = picker.cursor.min(picker.entries.len().saturating_sub(1));
    }

    fn picker_choose_highlighted(&mut self) {
        let Some(picker) = self.picker.as_ref() else {
            return;
        };
        let Some(target) = picker.entries.get(picker.cursor).cloned() else {
            return;
        };
        self.add_picked_favorite(target);
    }

    fn picker_choose_current_dir(&mut self) {
        let Some(picker) = self.picker.as_ref() else {
            return;
        };
        let target = picker.current_dir.clone();
        self.add_picked_favorite(target);
    }

    fn add_picked_favorite(&mut self, path: PathBuf) {
        if self.store.add_favorite(&path.to_string_lossy()) {
            self.reload();
        }
        self.close_picker();
    }

    // --- Event handling sub-methods ---

    pub(super) fn handle_normal_mode_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('/') => {
                self.mode = PaneMode::Filtering;
                self.filter_cursor_pos = self.filter_input.len();
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Enter => self.confirm_current(),
            KeyCode::Char('y') => self.yank_marked_or_current(),
            KeyCode::Down | KeyCode::Char('j') => self.move_vertical(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_vertical(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_horizontal(1),
            KeyCode::Left | KeyCode::Char('h') => self.move_horizontal(-1),
            KeyCode::Char(' ') => self.toggle_mark(),
            KeyCode::Char('d') => self.remove_marked_or_current(),
            KeyCode::Char('a') => self.open_picker(),
            KeyCode::Char('r') => self.request_refresh(),
            KeyCode::Char('v') => self.toggle_view_mode(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.zoom_in(),
            KeyCode::Char('-') => self.zoom_out(),
            _ => {}
        }
    }

    pub(super) fn handle_filtering_mode_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Enter => {
                // Keep the query active and go back to navigating.
                self.mode = PaneMode::Normal;
            }
            KeyCode::Esc => {
                self.mode = PaneMode::Normal;
                self.filter_input.clear();
                self.filter_cursor_pos = 0;
                self.apply_filter();
            }
            KeyCode::Char(c) => {
                self.filter_input.insert(self.filter_cursor_pos, c);
                self.filter_cursor_pos += c.len_utf8();
                self.apply_filter();
            }
            KeyCode::Backspace => {
                if let Some(prev) = self.char_before_filter_cursor() {
                    self.filter_cursor_pos -= prev.len_utf8();
                    self.filter_input.remove(self.filter_cursor_pos);
                    self.apply_filter();
                }
            }
            KeyCode::Left => {
                if let Some(prev) = self.char_before_filter_cursor() {
                    self.filter_cursor_pos -= prev.len_utf8();
                }
            }
            KeyCode::Right => {
                if let Some(next) = self.filter_input[self.filter_cursor_pos..].chars().next() {
                    self.filter_cursor_pos += next.len_utf8();
                }
            }
            _ => {}
        }
    }

    fn char_before_filter_cursor(&self) -> Option<char> {
        self.filter_input[..self.filter_cursor_pos].chars().next_back()
    }

    pub(super) fn handle_picking_mode_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc | KeyCode::Char('q') => self.close_picker(),
            KeyCode::Down | KeyCode::Char('j') => self.picker_step(1),
            KeyCode::Up | KeyCode::Char('k') => self.picker_step(-1),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.picker_descend(),
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => self.picker_ascend(),
            KeyCode::Char(' ') => self.picker_choose_highlighted(),
            KeyCode::Char('a') => self.picker_choose_current_dir(),
            KeyCode::Char('.') => self.picker_toggle_hidden(),
            _ => {}
        }
    }
}
