use anyhow::Result;
use std::path::PathBuf;

use brawlsave::SaveConfig;

use super::util::{open_save, print_json};

pub fn exec(path: PathBuf, json: bool, cfg: SaveConfig) -> Result<()> {
    let save = open_save(&path, cfg)?;
    if json {
        print_json(&save.summary())
    } else {
        print!("{}", save);
        Ok(())
    }
}
