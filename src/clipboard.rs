use anyhow::Result;
use arboard::Clipboard;
use std::path::PathBuf;

#[cfg(target_os = "linux")]
use anyhow::Context;
#[cfg(target_os = "linux")]
use arboard::SetExtLinux;

/// Internal argv marker for the hidden clipboard-daemon mode.
pub const DAEMON_FLAG: &str = "__favpane_clipboard_daemon__";

/// Copies the given paths to the system clipboard, one per line.
///
/// On Linux the selection belongs to whichever process offers it, so
/// text handed over by a short-lived CLI would vanish the moment we
/// exit. We re-exec ourselves with [`DAEMON_FLAG`] and pipe the text to
/// that child, which keeps serving the selection until another
/// application takes it over.
pub fn copy_paths(paths: &[PathBuf]) -> Result<()> {
    let text = paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n");

    #[cfg(target_os = "linux")]
    {
        use std::io::Write;
        use std::process::{Command, Stdio};

        let exe = std::env::current_exe().context("Could not locate the favpane executable")?;
        let mut child = Command::new(exe)
            .arg(DAEMON_FLAG)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .current_dir("/")
            .spawn()
            .context("Failed to spawn the clipboard daemon")?;

        let mut stdin = child
            .stdin
            .take()
            .context("Clipboard daemon has no stdin")?;
        stdin.write_all(text.as_bytes())?;
        stdin.flush()?;
        // The child outlives us and owns the selection from here on.
    }

    #[cfg(not(target_os = "linux"))]
    {
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
    }

    Ok(())
}

/// Runs the daemon when the marker flag is present. Returns `true` if
/// this invocation was the daemon (the caller should exit right away)
/// and `false` for a normal run. Must be called before argument parsing
/// so the flag never reaches clap.
pub fn run_daemon_if_requested() -> Result<bool> {
    if !std::env::args().any(|arg| arg == DAEMON_FLAG) {
        return Ok(false);
    }

    // Off Linux nothing spawns us like this; treat it as a no-op run.
    #[cfg(target_os = "linux")]
    serve_selection()?;

    Ok(true)
}

/// Reads the payload from stdin, then blocks inside arboard until some
/// other clipboard owner replaces us.
#[cfg(target_os = "linux")]
fn serve_selection() -> Result<()> {
    let text = std::io::read_to_string(std::io::stdin())
        .context("Clipboard daemon could not read its payload")?;

    let mut clipboard = Clipboard::new()?;
    clipboard.set().wait().text(text)?;
    Ok(())
}
