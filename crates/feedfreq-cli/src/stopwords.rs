//! `stopwords`: view and edit custom stopwords.

use std::io::Write;

use clap::Subcommand;
use feedfreq_analyzer::StopwordSet;
use feedfreq_core::{JsonFileSettingsStore, SettingsStore};

use crate::load_settings;

/// Sub-commands available under `stopwords`.
#[derive(Debug, Subcommand)]
pub enum StopwordsCommands {
    /// Show the number of built-in stopwords and every custom one
    List,
    /// Add custom stopwords
    Add {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Remove custom stopwords
    Remove {
        #[arg(required = true)]
        words: Vec<String>,
    },
}

/// # Errors
///
/// Returns an error if settings cannot be loaded or saved, or output cannot
/// be written.
pub(crate) fn run_stopwords(
    store: &JsonFileSettingsStore,
    command: &StopwordsCommands,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut settings = load_settings(store)?;

    match command {
        StopwordsCommands::List => {
            writeln!(out, "{} built-in stopwords", StopwordSet::default_count())?;
            if settings.custom_stopwords.is_empty() {
                writeln!(out, "no custom stopwords")?;
            } else {
                writeln!(out, "{} custom:", settings.custom_stopwords.len())?;
                for word in &settings.custom_stopwords {
                    writeln!(out, "  {word}")?;
                }
            }
            return Ok(());
        }
        StopwordsCommands::Add { words } => {
            let added = settings.add_stopwords(words);
            writeln!(out, "added {added} stopwords")?;
        }
        StopwordsCommands::Remove { words } => {
            let removed = settings.remove_stopwords(words);
            writeln!(out, "removed {removed} stopwords")?;
        }
    }

    store.save(&settings)?;
    tracing::debug!(
        path = %store.path().display(),
        custom = settings.custom_stopwords.len(),
        "settings saved"
    );
    Ok(())
}
