use crate::favorites::FavoriteEntry;
use chrono::{DateTime, Local};
use std::path::Path;

/// Human-readable byte size, stepping through B / KB / MB / GB.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{} KB", bytes / 1024)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

/// The secondary detail for an entry: child count for directories, byte
/// size for files.
pub fn entry_meta(entry: &FavoriteEntry) -> String {
    if entry.is_dir {
        match entry.children {
            1 => "1 item".to_string(),
            n => format!("{} items", n),
        }
    } else {
        format_size(entry.size)
    }
}

pub fn format_modified(modified: &DateTime<Local>) -> String {
    modified.format("%Y-%m-%d %H:%M").to_string()
}

/// Entry name as shown in the pane, with a trailing `/` on directories.
pub fn entry_label(entry: &FavoriteEntry) -> String {
    if entry.is_dir {
        format!("{}/", entry.name)
    } else {
        entry.name.clone()
    }
}

/// Replaces the home directory prefix with `~` for compact display.
pub fn shorten_path(path: &Path) -> String {
    shorten_with_home(path, dirs::home_dir().as_deref())
}

fn shorten_with_home(path: &Path, home: Option<&Path>) -> String {
    if let Some(home) = home {
        if path == home {
            return "~".to_string();
        }
        if let Ok(rest) = path.strip_prefix(home) {
            return format!("~/{}", rest.display());
        }
    }
    path.display().to_string()
}

/// Truncates `text` to at most `width` characters, marking the cut with
/// an ellipsis.
pub fn fit_cell(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(width.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

/// One line per entry for the non-interactive listing.
pub fn list_row(entry: &FavoriteEntry) -> String {
    format!(
        "{:<28} {:>9}  {}  {}",
        fit_cell(&entry_label(entry), 28),
        entry_meta(entry),
        format_modified(&entry.modified),
        shorten_path(&entry.path),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::UNIX_EPOCH;

    fn dir_entry(name: &str, children: usize) -> FavoriteEntry {
        FavoriteEntry {
            path: PathBuf::from("/data").join(name),
            name: name.to_string(),
            is_dir: true,
            children,
            size: 0,
            modified: DateTime::<Local>::from(UNIX_EPOCH),
        }
    }

    fn file_entry(name: &str, size: u64) -> FavoriteEntry {
        FavoriteEntry {
            path: PathBuf::from("/data").join(name),
            name: name.to_string(),
            is_dir: false,
            children: 0,
            size,
            modified: DateTime::<Local>::from(UNIX_EPOCH),
        }
    }

    #[test]
    fn size_ladder_picks_sensible_units() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(2048), "2 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn directories_show_child_counts_and_files_show_sizes() {
        assert_eq!(entry_meta(&dir_entry("empty", 0)), "0 items");
        assert_eq!(entry_meta(&dir_entry("single", 1)), "1 item");
        assert_eq!(entry_meta(&dir_entry("busy", 42)), "42 items");
        assert_eq!(entry_meta(&file_entry("a.bin", 512)), "512 B");
    }

    #[test]
    fn directory_labels_carry_a_trailing_slash() {
        assert_eq!(entry_label(&dir_entry("photos", 3)), "photos/");
        assert_eq!(entry_label(&file_entry("a.txt", 1)), "a.txt");
    }

    #[test]
    fn home_prefix_collapses_to_tilde() {
        let home = PathBuf::from("/home/sam");
        assert_eq!(
            shorten_with_home(Path::new("/home/sam/docs/tax"), Some(&home)),
            "~/docs/tax"
        );
        assert_eq!(shorten_with_home(Path::new("/home/sam"), Some(&home)), "~");
        assert_eq!(
            shorten_with_home(Path::new("/srv/www"), Some(&home)),
            "/srv/www"
        );
        assert_eq!(shorten_with_home(Path::new("/srv/www"), None), "/srv/www");
    }

    #[test]
    fn fit_cell_truncates_with_an_ellipsis() {
        assert_eq!(fit_cell("short", 10), "short");
        assert_eq!(fit_cell("exactly-ten", 11), "exactly-ten");
        assert_eq!(fit_cell("much-too-long-name", 8), "much-to…");
        assert_eq!(fit_cell("anything", 0), "");
    }
}
