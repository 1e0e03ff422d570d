use super::read_document;
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use folio_editor::{Autosave, DocumentStore, FileStore};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct SaveArgs {
    /// JSON block document to store
    pub input: PathBuf,
}

/// Store a document under the configured key
pub fn save(args: SaveArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let document = read_document(cwd, &args.input)?;
    let mut store = FileStore::open(config.get_data_dir(cwd));

    let mut autosave = Autosave::new(config.store_key(), config.autosave_window());
    autosave.schedule(document.blocks().to_vec(), Instant::now());
    if !autosave.flush(&mut store) {
        return Err(anyhow!("Could not save document under {}", config.store_key()));
    }

    println!(
        "{} Saved {} blocks as {}",
        "✓".green(),
        document.blocks().len(),
        config.store_key().to_string().bright_white()
    );
    Ok(())
}

/// Remove the stored document
pub fn clear(cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let key = config.store_key();
    let mut store = FileStore::open(config.get_data_dir(cwd));

    if !store.exists(&key) {
        println!("{} Nothing stored under {}", "⚠️".yellow(), key);
        return Ok(());
    }
    if !store.clear(&key) {
        return Err(anyhow!("Could not clear {}", key));
    }

    println!("{} Cleared {}", "✓".green(), key);
    Ok(())
}
