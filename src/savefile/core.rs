//! savefile/core — SaveFile: владеет парами AutoSave/Net и единственной доменной мутацией.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::SaveConfig;
use crate::consts::GOLDEN_HAMMERS_SAFE_MAX;
use crate::error::SaveError;
use crate::pair::{RedundantPair, Warning};
use crate::record::{AutoSave, NetSave, GOLDEN_HAMMERS};

/// One edit session over a save directory.
#[derive(Debug)]
pub struct SaveFile {
    pub(crate) directory: PathBuf,
    pub(crate) cfg: SaveConfig,
    pub(crate) autosave: RedundantPair<AutoSave>,
    pub(crate) net: Option<RedundantPair<NetSave>>,
    pub(crate) load_warnings: Vec<Warning>,
}

impl SaveFile {
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn autosave(&self) -> &RedundantPair<AutoSave> {
        &self.autosave
    }

    /// In-memory access for tooling; nothing is written until the next commit.
    pub fn autosave_mut(&mut self) -> &mut RedundantPair<AutoSave> {
        &mut self.autosave
    }

    pub fn net(&self) -> Option<&RedundantPair<NetSave>> {
        self.net.as_ref()
    }

    /// Counter of the primary AutoSave copy.
    pub fn golden_hammers(&self) -> u8 {
        self.autosave.primary().golden_hammers()
    }

    /// Set the golden-hammer counter (0..=255) on both AutoSave copies and persist them.
    ///
    /// Values above 5 are accepted; in-game they glitch the milestone wall.
    pub fn set_counter(&mut self, value: i64) -> Result<(), SaveError> {
        self.autosave.set_field(GOLDEN_HAMMERS, value)?;
        if value > GOLDEN_HAMMERS_SAFE_MAX as i64 {
            warn!(
                "golden hammers set to {} (> {}), the milestone wall may glitch",
                value, GOLDEN_HAMMERS_SAFE_MAX
            );
        }
        self.autosave.commit(self.cfg.sync)?;
        info!("golden hammers = {} written to {}", value, self.directory.display());
        Ok(())
    }
}
