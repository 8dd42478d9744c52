use clap::Parser;
use std::path::PathBuf;

/// favpane – keep favorite paths one keystroke away
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print the resolved favorites and exit without the TUI.
    #[arg(long)]
    pub list: bool,

    /// Add paths to the favorites and exit.
    /// Can be specified multiple times using --add <PATH_1> --add <PATH_2> ...
    #[arg(long, value_name = "PATH")]
    pub add: Vec<PathBuf>,

    /// Remove paths from the favorites and exit.
    #[arg(long, value_name = "PATH")]
    pub remove: Vec<PathBuf>,

    /// Drop favorites whose paths no longer exist, then exit.
    #[arg(long)]
    pub prune: bool,

    /// Settings file to use instead of the per-user default location.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
