use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Upper bound for the grid column count. Zooming clamps against this.
pub const MAX_COLUMN_COUNT: u16 = 8;

/// Default grid column count for fresh installs.
pub const DEFAULT_COLUMN_COUNT: u16 = 3;

/// How the favorites pane lays out its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    List,
    Grid,
}

/// Persisted user settings. Unknown fields in the file are ignored and
/// missing fields fall back to the defaults, so older config files keep
/// working after upgrades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Favorite paths in the order the user added them.
    pub favorites: Vec<String>,
    pub view_mode: ViewMode,
    pub column_count: u16,
    pub show_hidden: bool,
    pub pull_to_refresh: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            favorites: Vec::new(),
            view_mode: ViewMode::Grid,
            column_count: DEFAULT_COLUMN_COUNT,
            show_hidden: false,
            pull_to_refresh: true,
        }
    }
}

impl Settings {
    /// Forces the column count back into `1..=MAX_COLUMN_COUNT`. Config
    /// files are user-editable, so out-of-range values can show up.
    fn clamp_columns(&mut self) {
        self.column_count = self.column_count.clamp(1, MAX_COLUMN_COUNT);
    }
}

/// On-disk settings store. All mutation goes through this type; callers
/// decide when to `save()`.
#[derive(Debug)]
pub struct Store {
    settings: Settings,
    path: PathBuf,
}

impl Store {
    /// Opens the store at `path`, creating default settings in memory if
    /// the file does not exist yet. A file that exists but cannot be
    /// parsed is an error rather than silently replaced.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let settings = match fs::read_to_string(&path) {
            Ok(contents) => {
                let mut settings: Settings = serde_json::from_str(&contents)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))?;
                settings.clamp_columns();
                settings
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Settings::default(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read config file {}", path.display()));
            }
        };
        Ok(Store { settings, path })
    }

    /// Opens the store at the conventional per-user location,
    /// e.g. `~/.config/favpane/config.json` on Linux.
    pub fn open_default() -> Result<Self> {
        Store::load(Store::default_path()?)
    }

    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().context("Could not determine the user config directory")?;
        Ok(base.join("favpane").join("config.json"))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Adds a path to the favorites. Returns `false` if it was already
    /// stored; the list never holds duplicates.
    pub fn add_favorite(&mut self, path: &str) -> bool {
        if self.settings.favorites.iter().any(|p| p == path) {
            return false;
        }
        self.settings.favorites.push(path.to_string());
        true
    }

    /// Removes a path from the favorites. Returns `false` if it was not
    /// stored.
    pub fn remove_favorite(&mut self, path: &str) -> bool {
        let before = self.settings.favorites.len();
        self.settings.favorites.retain(|p| p != path);
        self.settings.favorites.len() != before
    }

    /// Drops every favorite whose path no longer exists on disk and
    /// returns the removed entries.
    pub fn prune_missing(&mut self) -> Vec<String> {
        let (kept, removed) = self
            .settings
            .favorites
            .drain(..)
            .partition(|p| Path::new(p).exists());
        self.settings.favorites = kept;
        removed
    }

    /// Writes the settings back to disk, creating parent directories as
    /// needed.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(&self.settings)?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write config file {}", self.path.display()))
    }
}
