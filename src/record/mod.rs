//! record — codec for fixed-size records: static layout + CRC32 trailer.
//!
//! Разделение по подмодулям:
//! - layout.rs   — FieldKind/FieldSpec/Layout, AUTOSAVE_LAYOUT и NET_LAYOUT.
//! - checksum.rs — CRC32 (IEEE) трейлера, big-endian.
//! - kinds.rs    — RecordKind и маркеры AutoSave / NetSave.
//! - codec.rs    — Record<K>: decode/encode/encode_with_checksum, поля, stored vs computed CRC.

pub mod checksum;
pub mod codec;
pub mod kinds;
pub mod layout;

pub use checksum::{checksum_hex, crc32, crc32_be, split_trailer, verify_trailer};
pub use codec::{FieldValue, Record};
pub use kinds::{AutoSave, NetSave, RecordKind};
pub use layout::{FieldKind, FieldSpec, Layout, AUTOSAVE_LAYOUT, GOLDEN_HAMMERS, NET_LAYOUT};
