use anyhow::{Context, Result};
use std::path::PathBuf;

use brawlsave::consts::GOLDEN_HAMMERS_SAFE_MAX;
use brawlsave::SaveConfig;

use super::util::open_save;

pub fn exec(path: PathBuf, value: i64, cfg: SaveConfig) -> Result<()> {
    let mut save = open_save(&path, cfg)?;
    let before = save.golden_hammers();

    if value > GOLDEN_HAMMERS_SAFE_MAX as i64 {
        println!(
            "NOTE: more than {} golden hammers will glitch the milestone wall",
            GOLDEN_HAMMERS_SAFE_MAX
        );
    }

    save.set_counter(value)
        .with_context(|| format!("set golden hammers to {}", value))?;

    println!("Golden Hammers: {} -> {}", before, value);
    println!();
    print!("{}", save);
    Ok(())
}
