use std::path::PathBuf;

/// What the interactive session resolved to. The caller acts on this
/// after the terminal has been restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneOutcome {
    /// The user left without choosing anything.
    Cancelled,
    /// The user confirmed a favorite; its path goes to stdout.
    Open(PathBuf),
    /// The user asked for these paths on the clipboard.
    Yank(Vec<PathBuf>),
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub(super) enum PaneMode {
    // pub(super) for use within tui module
    Normal,
    Filtering,
    Picking,
}

/// State of the add-favorite directory picker while it is open.
#[derive(Debug, Clone)]
pub(super) struct PickerState {
    pub current_dir: PathBuf,
    /// Subdirectories of `current_dir`, sorted by name.
    pub entries: Vec<PathBuf>,
    pub cursor: usize,
    /// Session-local copy of the hidden-files toggle; flipping it here
    /// does not touch the stored setting.
    pub show_hidden: bool,
}
