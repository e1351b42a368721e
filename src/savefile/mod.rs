//! savefile — high-level API над папкой сохранения (autosv*.bin + опционально net*.bin)
//!
//! Разделение по подмодулям:
//! - core.rs   — структура SaveFile, доступ к парам, set_counter (validate + mutate + commit)
//! - open.rs   — открытие директории (open/open_with + SaveFileBuilder), политика NetMode
//! - report.rs — агрегированные предупреждения, текстовый отчёт и SaveReport (serde)

pub mod core;
pub mod open;
pub mod report;

pub use self::core::SaveFile;
pub use report::{RecordSummary, SaveReport};
