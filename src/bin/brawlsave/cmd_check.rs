use anyhow::Result;
use std::path::PathBuf;

use brawlsave::SaveConfig;

use super::util::{open_save, print_json};

/// Returns true when the folder is clean (no warnings).
pub fn exec(path: PathBuf, json: bool, cfg: SaveConfig) -> Result<bool> {
    let save = open_save(&path, cfg)?;
    let warnings = save.warnings();

    if json {
        print_json(&warnings)?;
    } else if warnings.is_empty() {
        let pairs = 1 + save.net().map(|_| 1).unwrap_or(0);
        println!("OK: {} pair(s) consistent, checksums valid", pairs);
    } else {
        for w in &warnings {
            println!("WARNING: {}", w);
        }
        println!("{} warning(s)", warnings.len());
    }
    Ok(warnings.is_empty())
}
