//! savefile/open — открытие директории сохранения.
//!
//! - AutoSave пара обязательна (autosv0.bin + autosv1.bin).
//! - Net пара — по NetMode: Auto (если есть хотя бы один net*.bin), Required, Off.
//! - Любая IO/format ошибка прерывает открытие целиком: частично собранный SaveFile не возвращается.
//! - Предупреждения загрузки (CRC/расхождение копий) собираются и логируются, но не фатальны.

use std::path::Path;

use log::{debug, warn};

use crate::config::{NetMode, SaveConfig, SaveFileBuilder};
use crate::consts::COPIES_PER_RECORD;
use crate::error::SaveError;
use crate::pair::RedundantPair;
use crate::record::{AutoSave, NetSave, RecordKind};

use super::core::SaveFile;

impl SaveFile {
    /// Open with the default configuration.
    pub fn open(dir: &Path) -> Result<Self, SaveError> {
        Self::open_with(dir, SaveConfig::default())
    }

    pub fn builder() -> SaveFileBuilder {
        SaveFileBuilder::new()
    }

    pub fn open_with(dir: &Path, cfg: SaveConfig) -> Result<Self, SaveError> {
        debug!("open {} with {}", dir.display(), cfg);

        let autosave = RedundantPair::<AutoSave>::load_from_dir(dir)?;

        let net = match cfg.net {
            NetMode::Off => None,
            NetMode::Required => Some(RedundantPair::<NetSave>::load_from_dir(dir)?),
            NetMode::Auto => {
                let any_present =
                    (0..COPIES_PER_RECORD).any(|i| NetSave::copy_path(dir, i).exists());
                if any_present {
                    Some(RedundantPair::<NetSave>::load_from_dir(dir)?)
                } else {
                    debug!("no {}*.bin in {}, Net pair skipped", NetSave::FILE_STEM, dir.display());
                    None
                }
            }
        };

        let mut sf = SaveFile {
            directory: dir.to_path_buf(),
            cfg,
            autosave,
            net,
            load_warnings: Vec::new(),
        };
        sf.load_warnings = sf.warnings();
        for w in &sf.load_warnings {
            warn!("{}", w);
        }
        Ok(sf)
    }
}
