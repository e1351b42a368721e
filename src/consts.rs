//! Общие константы форматов (AutoSave, Net, трейлер checksum).

// -------- Checksum trailer --------
/// CRC32 (BE) в конце каждого файла, вне payload.
pub const CHECKSUM_LEN: usize = 4;

// -------- AutoSave (autosv0.bin / autosv1.bin) --------
pub const AUTOSAVE_FILE_STEM: &str = "autosv";
pub const AUTOSAVE_UNKNOWN1_LEN: usize = 0x15B0;
pub const AUTOSAVE_HAMMERS_OFF: usize = AUTOSAVE_UNKNOWN1_LEN;
pub const AUTOSAVE_UNKNOWN2_LEN: usize = 0xB0CB;
// 0x15B0 + 1 + 0xB0CB = 50812
pub const AUTOSAVE_PAYLOAD_LEN: usize = AUTOSAVE_UNKNOWN1_LEN + 1 + AUTOSAVE_UNKNOWN2_LEN;
pub const AUTOSAVE_FILE_LEN: usize = AUTOSAVE_PAYLOAD_LEN + CHECKSUM_LEN;

/// Above this the milestone wall glitches in-game; the codec still accepts it.
pub const GOLDEN_HAMMERS_SAFE_MAX: u8 = 5;

// -------- Net (net0.bin / net1.bin) --------
pub const NET_FILE_STEM: &str = "net";
pub const NET_PAYLOAD_LEN: usize = 0x281C;
pub const NET_FILE_LEN: usize = NET_PAYLOAD_LEN + CHECKSUM_LEN;

// -------- Files --------
pub const FILE_EXT: &str = "bin";
/// Number of mirrored copies the game keeps per record.
pub const COPIES_PER_RECORD: usize = 2;
/// Suffix for the temporary file used by atomic replace.
pub const TMP_SUFFIX: &str = "tmp";
