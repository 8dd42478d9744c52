use crate::{cli, clipboard, config, display, favorites, tui};
use anyhow::Result;

// Opens the settings store, honoring --config.
fn open_store(cli_args: &cli::Cli) -> Result<config::Store> {
    match &cli_args.config {
        Some(path) => config::Store::load(path.clone()),
        None => config::Store::open_default(),
    }
}

// What a headless edit invocation amounted to: nothing was asked for,
// at least one requested edit took effect, or every one failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditOutcome {
    NotRequested,
    Applied,
    Failed,
}

// Applies the headless edit flags (--add, --remove, --prune) to the
// store and saves it. Individual bad paths are warned about and
// skipped; nothing is saved when every requested edit failed.
fn run_store_edits(store: &mut config::Store, cli_args: &cli::Cli) -> Result<EditOutcome> {
    let requested = !cli_args.add.is_empty() || !cli_args.remove.is_empty() || cli_args.prune;
    if !requested {
        return Ok(EditOutcome::NotRequested);
    }
    let mut applied = false;

    for path in &cli_args.add {
        // Canonicalizing keeps the store free of relative paths, and
        // refuses paths that do not exist.
        match path.canonicalize() {
            Ok(absolute) => {
                if store.add_favorite(&absolute.to_string_lossy()) {
                    println!("✅ Added {}", absolute.display());
                } else {
                    println!("Already a favorite: {}", absolute.display());
                }
                applied = true;
            }
            Err(e) => eprintln!("⚠️ Warning: Skipping {}: {}", path.display(), e),
        }
    }

    for path in &cli_args.remove {
        // Try the path as given first so favorites whose target is gone
        // can still be removed, then fall back to the canonical form.
        let mut removed = store.remove_favorite(&path.to_string_lossy());
        if !removed {
            if let Ok(absolute) = path.canonicalize() {
                removed = store.remove_favorite(&absolute.to_string_lossy());
            }
        }
        if removed {
            println!("Removed {}", path.display());
            applied = true;
        } else {
            eprintln!("⚠️ Warning: Not a favorite: {}", path.display());
        }
    }

    if cli_args.prune {
        let removed = store.prune_missing();
        for path in &removed {
            println!("Pruned {}", path);
        }
        println!("Pruned {} stale favorite(s).", removed.len());
        applied = true;
    }

    if !applied {
        return Ok(EditOutcome::Failed);
    }
    store.save()?;
    Ok(EditOutcome::Applied)
}

fn print_listing(entries: &[favorites::FavoriteEntry]) {
    if entries.is_empty() {
        println!("No favorites stored. Add one with --add <PATH>.");
        return;
    }
    for entry in entries {
        println!("{}", display::list_row(entry));
    }
}

// Main orchestrator for the favpane application logic.
pub fn run_favpane(cli_args: cli::Cli) -> Result<()> {
    // Step 1: Open the settings store.
    let mut store = open_store(&cli_args)?;

    // Step 2: Apply any headless edits before resolving the favorites.
    let edits = run_store_edits(&mut store, &cli_args)?;

    // Exit if edits were requested and every one of them failed.
    if edits == EditOutcome::Failed {
        eprintln!("Error: No favorites were changed.");
        std::process::exit(1);
    }

    // Step 3: Resolve the stored favorites against the filesystem.
    let entries = favorites::materialize(&store.settings().favorites);

    if cli_args.list {
        print_listing(&entries);
        return Ok(());
    }
    if edits == EditOutcome::Applied {
        // Edit-only invocation; nothing interactive to do.
        return Ok(());
    }

    // Step 4: Run the interactive pane. It edits the store in place.
    let outcome = tui::run_favorites_pane(&mut store, entries)?;

    // Step 5: Persist whatever the session changed, then act on the
    // outcome. Stdout carries nothing but the confirmed path, so
    // wrappers like `cd "$(favpane)"` stay safe.
    store.save()?;
    match outcome {
        tui::PaneOutcome::Open(path) => println!("{}", path.display()),
        tui::PaneOutcome::Yank(paths) => {
            let count = paths.len();
            clipboard::copy_paths(&paths)?;
            eprintln!("✅ Copied {} path(s) to the clipboard.", count);
        }
        tui::PaneOutcome::Cancelled => {
            // Non-zero exit so `cd "$(favpane)"` chains fail cleanly.
            std::process::exit(1);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    /// A parsed command line that only sets --config, pointing the
    /// store at a file under `dir`.
    fn base_cli(dir: &TempDir) -> cli::Cli {
        cli::Cli {
            list: false,
            add: Vec::new(),
            remove: Vec::new(),
            prune: false,
            config: Some(dir.path().join("config.json")),
        }
    }

    fn reload(cli_args: &cli::Cli) -> config::Store {
        open_store(cli_args).unwrap()
    }

    #[test]
    fn no_edit_flags_means_nothing_is_requested() {
        let dir = tempdir().unwrap();
        let cli_args = base_cli(&dir);
        let mut store = open_store(&cli_args).unwrap();

        let outcome = run_store_edits(&mut store, &cli_args).unwrap();

        assert_eq!(outcome, EditOutcome::NotRequested);
        // A plain run does not even create the config file.
        assert!(!cli_args.config.as_ref().unwrap().exists());
    }

    #[test]
    fn add_stores_the_canonical_form_and_saves_it() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();

        let mut cli_args = base_cli(&dir);
        // A spelling with a `..` hop canonicalizes to `sub` itself.
        cli_args.add = vec![dir.path().join("sub").join("..").join("sub")];
        let mut store = open_store(&cli_args).unwrap();

        let outcome = run_store_edits(&mut store, &cli_args).unwrap();

        assert_eq!(outcome, EditOutcome::Applied);
        let expected = sub.canonicalize().unwrap().to_string_lossy().into_owned();
        assert_eq!(store.settings().favorites, vec![expected.clone()]);
        assert_eq!(reload(&cli_args).settings().favorites, vec![expected]);
    }

    #[test]
    fn add_skips_paths_that_do_not_exist() {
        let dir = tempdir().unwrap();
        let mut cli_args = base_cli(&dir);
        cli_args.add = vec![dir.path().join("ghost")];
        let mut store = open_store(&cli_args).unwrap();

        let outcome = run_store_edits(&mut store, &cli_args).unwrap();

        assert_eq!(outcome, EditOutcome::Failed);
        assert!(store.settings().favorites.is_empty());
        // A failed run leaves no trace on disk either.
        assert!(!cli_args.config.as_ref().unwrap().exists());
    }

    #[test]
    fn one_good_add_outweighs_a_bad_one() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("real");
        std::fs::create_dir(&real).unwrap();

        let mut cli_args = base_cli(&dir);
        cli_args.add = vec![dir.path().join("ghost"), real];
        let mut store = open_store(&cli_args).unwrap();

        let outcome = run_store_edits(&mut store, &cli_args).unwrap();

        assert_eq!(outcome, EditOutcome::Applied);
        assert_eq!(store.settings().favorites.len(), 1);
    }

    #[test]
    fn remove_accepts_the_stored_form_of_a_vanished_favorite() {
        let dir = tempdir().unwrap();
        let doomed = dir.path().join("doomed");
        std::fs::create_dir(&doomed).unwrap();

        let mut cli_args = base_cli(&dir);
        cli_args.add = vec![doomed.clone()];
        let mut store = open_store(&cli_args).unwrap();
        run_store_edits(&mut store, &cli_args).unwrap();
        let stored = store.settings().favorites[0].clone();

        // The target disappears before the removal; canonicalizing the
        // argument would fail now, but the stored string still matches.
        std::fs::remove_dir(&doomed).unwrap();
        cli_args.add.clear();
        cli_args.remove = vec![PathBuf::from(&stored)];

        let outcome = run_store_edits(&mut store, &cli_args).unwrap();

        assert_eq!(outcome, EditOutcome::Applied);
        assert!(store.settings().favorites.is_empty());
        assert!(reload(&cli_args).settings().favorites.is_empty());
    }

    #[test]
    fn remove_falls_back_to_the_canonical_form() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();

        let mut cli_args = base_cli(&dir);
        cli_args.add = vec![sub];
        let mut store = open_store(&cli_args).unwrap();
        run_store_edits(&mut store, &cli_args).unwrap();

        // Asked for with a spelling that only matches once canonicalized.
        cli_args.add.clear();
        cli_args.remove = vec![dir.path().join("sub").join("..").join("sub")];

        let outcome = run_store_edits(&mut store, &cli_args).unwrap();

        assert_eq!(outcome, EditOutcome::Applied);
        assert!(store.settings().favorites.is_empty());
    }

    #[test]
    fn removing_something_never_stored_fails_the_run() {
        let dir = tempdir().unwrap();
        let mut cli_args = base_cli(&dir);
        cli_args.remove = vec![dir.path().join("never-stored")];
        let mut store = open_store(&cli_args).unwrap();

        let outcome = run_store_edits(&mut store, &cli_args).unwrap();

        assert_eq!(outcome, EditOutcome::Failed);
    }

    #[test]
    fn prune_drops_only_the_stale_favorites() {
        let dir = tempdir().unwrap();
        let keep = dir.path().join("keep");
        let stale = dir.path().join("stale");
        std::fs::create_dir(&keep).unwrap();
        std::fs::create_dir(&stale).unwrap();

        let mut cli_args = base_cli(&dir);
        cli_args.add = vec![keep, stale.clone()];
        let mut store = open_store(&cli_args).unwrap();
        run_store_edits(&mut store, &cli_args).unwrap();

        std::fs::remove_dir(&stale).unwrap();
        cli_args.add.clear();
        cli_args.prune = true;

        let outcome = run_store_edits(&mut store, &cli_args).unwrap();

        assert_eq!(outcome, EditOutcome::Applied);
        let favorites = reload(&cli_args).settings().favorites.clone();
        assert_eq!(favorites.len(), 1);
        assert!(favorites[0].ends_with("keep"));
    }
}
