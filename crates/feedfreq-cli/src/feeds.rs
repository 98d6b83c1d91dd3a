//! `feeds`: view and edit the selected feed set.

use std::io::Write;

use clap::Subcommand;
use feedfreq_core::{default_feeds, JsonFileSettingsStore, SettingsStore};

use crate::load_settings;

/// Sub-commands available under `feeds`.
#[derive(Debug, Subcommand)]
pub enum FeedsCommands {
    /// Show the selected feeds in processing order
    List,
    /// Select a feed, or change the URL of an already selected one
    Add { name: String, url: String },
    /// Deselect a feed
    Remove { name: String },
    /// Replace the selection with the default catalogue
    Reset,
    /// Show the default catalogue
    Defaults,
}

/// # Errors
///
/// Returns an error if settings cannot be loaded or saved, a feed is invalid,
/// or output cannot be written.
pub(crate) fn run_feeds(
    store: &JsonFileSettingsStore,
    command: &FeedsCommands,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        FeedsCommands::Defaults => {
            for (name, url) in default_feeds() {
                writeln!(out, "{name}\t{url}")?;
            }
            return Ok(());
        }
        FeedsCommands::List => {
            let settings = load_settings(store)?;
            if settings.selected_feeds.is_empty() {
                writeln!(out, "no feeds selected")?;
            }
            for (name, url) in &settings.selected_feeds {
                writeln!(out, "{name}\t{url}")?;
            }
            return Ok(());
        }
        _ => {}
    }

    let mut settings = load_settings(store)?;
    match command {
        FeedsCommands::Add { name, url } => {
            let replacing = settings.selected_feeds.contains_key(name.trim());
            settings.add_feed(name, url)?;
            let verb = if replacing { "updated" } else { "added" };
            writeln!(out, "{verb} feed '{}'", name.trim())?;
        }
        FeedsCommands::Remove { name } => {
            if !settings.remove_feed(name) {
                anyhow::bail!("feed '{name}' is not selected");
            }
            writeln!(out, "removed feed '{name}'")?;
        }
        FeedsCommands::Reset => {
            settings.reset_feeds();
            writeln!(
                out,
                "reset to {} default feeds",
                settings.selected_feeds.len()
            )?;
        }
        FeedsCommands::List | FeedsCommands::Defaults => {}
    }

    store.save(&settings)?;
    tracing::debug!(
        path = %store.path().display(),
        feeds = settings.selected_feeds.len(),
        "settings saved"
    );
    Ok(())
}
