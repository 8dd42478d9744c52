use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use walkdir::WalkDir;

/// A favorite path resolved against the filesystem, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteEntry {
    pub path: PathBuf,
    /// Final path component, or the full path when there is none (e.g. `/`).
    pub name: String,
    pub is_dir: bool,
    /// Direct children for directories; always 0 for files.
    pub children: usize,
    /// File size in bytes; always 0 for directories.
    pub size: u64,
    pub modified: DateTime<Local>,
}

/// Resolves stored favorite paths into displayable entries, preserving
/// the stored order. Paths that no longer exist (or cannot be stat'ed)
/// are skipped; the stored list itself is left untouched so the entries
/// come back if the path reappears, e.g. on a remounted drive.
pub fn materialize(paths: &[String]) -> Vec<FavoriteEntry> {
    let mut entries = Vec::with_capacity(paths.len());
    for raw in paths {
        let path = Path::new(raw);
        let Ok(meta) = fs::metadata(path) else {
            continue;
        };
        let is_dir = meta.is_dir();
        entries.push(FavoriteEntry {
            path: path.to_path_buf(),
            name: display_name(path, raw),
            is_dir,
            children: if is_dir { count_children(path) } else { 0 },
            size: if is_dir { 0 } else { meta.len() },
            modified: meta
                .modified()
                .map(DateTime::<Local>::from)
                .unwrap_or_else(|_| DateTime::<Local>::from(UNIX_EPOCH)),
        });
    }
    entries
}

fn display_name(path: &Path, raw: &str) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| raw.to_string())
}

/// Counts the direct children of a directory. Entries the walker cannot
/// read are simply not counted, so an unreadable directory reports 0
/// instead of failing the whole listing.
fn count_children(dir: &Path) -> usize {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .flatten()
        .count()
}
