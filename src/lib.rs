// Базовые модули
pub mod consts;
pub mod config;
pub mod error;

// Кодек записей: layout + CRC32 трейлер (src/record/{mod,layout,checksum,kinds,codec}.rs)
pub mod record;

// Файловый I/O целыми буферами (tmp+rename)
pub mod fsio;

// Зеркальные копии одной записи (autosv0/1, net0/1)
pub mod pair;

// Фасад над папкой сохранения (src/savefile/{mod,core,open,report}.rs)
pub mod savefile;

// Удобные реэкспорты
pub use config::{NetMode, SaveConfig, SaveFileBuilder};
pub use error::{CommitError, FormatError, IoError, SaveError, ValidationError};
pub use pair::{PairState, RedundantPair, StoredCopy, Warning};
pub use record::{AutoSave, FieldKind, FieldSpec, Layout, NetSave, Record, RecordKind};
pub use savefile::{RecordSummary, SaveFile, SaveReport};
