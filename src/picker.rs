use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Lists the immediate subdirectories of `dir`, sorted by name. Hidden
/// directories are included only when `show_hidden` is set. Entries the
/// walker cannot read are skipped without reporting; this runs while the
/// TUI owns the terminal, so there is nowhere to print to.
pub fn list_dirs(dir: &Path, show_hidden: bool) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(dir);
    builder
        .max_depth(Some(1))
        .follow_links(true)
        .hidden(!show_hidden)
        // Favorites are picked from the plain filesystem; ignore files
        // have no say here.
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false);

    let mut dirs: Vec<PathBuf> = builder
        .build()
        .flatten()
        .filter(|entry| entry.path() != dir)
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_dir()))
        .map(|entry| entry.into_path())
        .collect();

    dirs.sort_by_cached_key(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });
    dirs
}
