mod cli;
mod clipboard;
mod config;
mod display;
mod favorites;
mod picker;
mod search;
mod tui;
mod workflow;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    // Handle daemon mode first. This should stay in main.rs as it's an early exit.
    if clipboard::run_daemon_if_requested()? {
        return Ok(());
    }

    let cli_args = cli::Cli::parse();

    // Delegate the main application logic to the workflow module
    workflow::run_favpane(cli_args)
}
