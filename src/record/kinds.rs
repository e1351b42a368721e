//! record/kinds — маркер-типы записей (AutoSave, Net) и их привязка к layout/файлам.

use std::path::{Path, PathBuf};

use crate::consts::{AUTOSAVE_FILE_STEM, CHECKSUM_LEN, FILE_EXT, NET_FILE_STEM};

use super::layout::{Layout, AUTOSAVE_LAYOUT, NET_LAYOUT};

/// A fixed-size record type: its layout and where its copies live on disk.
pub trait RecordKind: Clone + std::fmt::Debug + PartialEq + 'static {
    const LAYOUT: &'static Layout;
    /// File name prefix; copy `i` lives in `<stem><i>.bin`.
    const FILE_STEM: &'static str;

    fn label() -> &'static str {
        Self::LAYOUT.name
    }

    fn payload_len() -> usize {
        Self::LAYOUT.payload_len()
    }

    /// Whole-file length (payload + CRC32 trailer).
    fn file_len() -> usize {
        Self::payload_len() + CHECKSUM_LEN
    }

    fn file_name(index: usize) -> String {
        format!("{}{}.{}", Self::FILE_STEM, index, FILE_EXT)
    }

    fn copy_path(dir: &Path, index: usize) -> PathBuf {
        dir.join(Self::file_name(index))
    }
}

/// `autosv0.bin` / `autosv1.bin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoSave;

impl RecordKind for AutoSave {
    const LAYOUT: &'static Layout = &AUTOSAVE_LAYOUT;
    const FILE_STEM: &'static str = AUTOSAVE_FILE_STEM;
}

/// `net0.bin` / `net1.bin` (entirely opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetSave;

impl RecordKind for NetSave {
    const LAYOUT: &'static Layout = &NET_LAYOUT;
    const FILE_STEM: &'static str = NET_FILE_STEM;
}
