use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use brawlsave::{SaveConfig, SaveFile};

/// Open the save folder with CLI-level options.
pub fn open_save(path: &Path, cfg: SaveConfig) -> Result<SaveFile> {
    SaveFile::open_with(path, cfg).with_context(|| format!("open save folder {}", path.display()))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize JSON output")?;
    println!("{}", s);
    Ok(())
}
