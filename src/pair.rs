//! pair — redundant on-disk copies of one logical record.
//!
//! Игра хранит каждую запись в двух файлах (autosv0/autosv1, net0/net1) и ожидает,
//! что они побайтно равны. Store:
//! - грузит все копии целиком и декодирует каждую независимо;
//! - validate() сообщает ChecksumMismatch / CopyDivergence (данные, а не ошибки);
//! - set_field() пишет значение во все копии в памяти (без I/O);
//! - commit() пересчитывает CRC каждой копии и заменяет файлы целиком.
//!
//! Расхождение копий никогда не «лечится» автоматически — только сообщается.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;

use crate::consts::COPIES_PER_RECORD;
use crate::error::{CommitError, SaveError, ValidationError};
use crate::fsio::{read_whole, replace_whole};
use crate::record::{checksum_hex, Record, RecordKind};

/// Lifecycle of a loaded pair. A pair value only exists once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairState {
    Loaded,
    /// In-memory payload differs from what was last loaded/written.
    Dirty,
    Committed,
}

/// Advisory finding about a pair. Never aborts an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Computed CRC of copy `index` differs from its stored trailer.
    ChecksumMismatch {
        record: &'static str,
        index: usize,
        path: PathBuf,
        stored: u32,
        computed: u32,
    },
    /// Payload of copy `index` is not byte-identical to copy `other` (the primary).
    CopyDivergence {
        record: &'static str,
        index: usize,
        other: usize,
        path: PathBuf,
        other_path: PathBuf,
        first_offset: usize,
    },
}

impl Warning {
    pub fn record(&self) -> &'static str {
        match self {
            Warning::ChecksumMismatch { record, .. } | Warning::CopyDivergence { record, .. } => {
                *record
            }
        }
    }

    pub fn is_checksum_mismatch(&self) -> bool {
        matches!(self, Warning::ChecksumMismatch { .. })
    }

    pub fn is_copy_divergence(&self) -> bool {
        matches!(self, Warning::CopyDivergence { .. })
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::ChecksumMismatch {
                record,
                index,
                path,
                stored,
                computed,
            } => write!(
                f,
                "{}{} checksum mismatch! ({}: stored {}, computed {})",
                record,
                index,
                file_name(path),
                checksum_hex(*stored),
                checksum_hex(*computed)
            ),
            Warning::CopyDivergence {
                path,
                other_path,
                first_offset,
                ..
            } => write!(
                f,
                "{} is NOT THE SAME as {}! (first difference at payload offset 0x{:X})",
                file_name(other_path),
                file_name(path),
                first_offset
            ),
        }
    }
}

fn file_name(p: &Path) -> String {
    p.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| p.display().to_string())
}

/// One copy: where it lives and what it decoded to.
#[derive(Debug, Clone)]
pub struct StoredCopy<K: RecordKind> {
    pub path: PathBuf,
    pub record: Record<K>,
}

/// Two (or more) mirrored copies of one record kind.
#[derive(Debug, Clone)]
pub struct RedundantPair<K: RecordKind> {
    copies: Vec<StoredCopy<K>>,
    state: PairState,
}

impl<K: RecordKind> RedundantPair<K> {
    /// Load the usual two copies.
    pub fn load(path_a: &Path, path_b: &Path) -> Result<Self, SaveError> {
        Self::load_copies(&[path_a.to_path_buf(), path_b.to_path_buf()])
    }

    /// Load `<dir>/<stem>0.bin` .. `<stem>N-1.bin` (N = COPIES_PER_RECORD).
    pub fn load_from_dir(dir: &Path) -> Result<Self, SaveError> {
        let paths: Vec<PathBuf> = (0..COPIES_PER_RECORD)
            .map(|i| K::copy_path(dir, i))
            .collect();
        Self::load_copies(&paths)
    }

    /// Load every path; the first IO/format failure aborts the whole load.
    pub fn load_copies(paths: &[PathBuf]) -> Result<Self, SaveError> {
        if paths.is_empty() {
            return Err(SaveError::NoCopies { record: K::label() });
        }

        // все файлы читаются до декодирования: отсутствующий файл важнее неверной длины
        let mut bufs = Vec::with_capacity(paths.len());
        for p in paths {
            bufs.push(read_whole(p)?);
        }

        let mut copies = Vec::with_capacity(paths.len());
        for (p, buf) in paths.iter().zip(bufs) {
            let record = Record::<K>::decode(&buf).map_err(|e| e.at(p))?;
            debug!(
                "{}: loaded {} (stored crc {})",
                K::label(),
                p.display(),
                checksum_hex(record.stored_checksum())
            );
            copies.push(StoredCopy {
                path: p.clone(),
                record,
            });
        }
        Ok(Self {
            copies,
            state: PairState::Loaded,
        })
    }

    pub fn state(&self) -> PairState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.copies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.copies.is_empty()
    }

    pub fn copy(&self, index: usize) -> Option<&StoredCopy<K>> {
        self.copies.get(index)
    }

    /// Mutable access to one in-memory copy. Marks the pair dirty.
    pub fn copy_mut(&mut self, index: usize) -> Option<&mut StoredCopy<K>> {
        let c = self.copies.get_mut(index)?;
        self.state = PairState::Dirty;
        Some(c)
    }

    /// First copy; the one reports render.
    pub fn primary(&self) -> &Record<K> {
        &self.copies[0].record
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.copies.iter().map(|c| c.path.as_path())
    }

    /// Current findings: per-copy checksum mismatches, then divergence from copy 0.
    pub fn validate(&self) -> Vec<Warning> {
        let mut out = Vec::new();
        for (i, c) in self.copies.iter().enumerate() {
            let computed = c.record.computed_checksum();
            let stored = c.record.stored_checksum();
            if computed != stored {
                out.push(Warning::ChecksumMismatch {
                    record: K::label(),
                    index: i,
                    path: c.path.clone(),
                    stored,
                    computed,
                });
            }
        }

        let first = &self.copies[0];
        for (i, c) in self.copies.iter().enumerate().skip(1) {
            if let Some(off) = first.record.payload_diff_offset(&c.record) {
                out.push(Warning::CopyDivergence {
                    record: K::label(),
                    index: i,
                    other: 0,
                    path: c.path.clone(),
                    other_path: first.path.clone(),
                    first_offset: off,
                });
            }
        }
        out
    }

    /// Set a scalar field on every copy (in memory only).
    pub fn set_field(&mut self, name: &str, value: i64) -> Result<(), ValidationError> {
        // layout общий: если первая копия приняла значение, примут и остальные
        for c in &mut self.copies {
            c.record.set_field(name, value)?;
        }
        self.state = PairState::Dirty;
        Ok(())
    }

    /// Write every copy (payload + fresh CRC) back to its path.
    ///
    /// All copies are attempted. Copies written before a failure stay written;
    /// the error lists exactly which paths succeeded and which did not.
    pub fn commit(&mut self, sync: bool) -> Result<(), CommitError> {
        let mut written = Vec::new();
        let mut failed = Vec::new();

        for c in &mut self.copies {
            let bytes = c.record.encode_with_checksum();
            let fresh = c.record.computed_checksum();
            match replace_whole(&c.path, &bytes, sync) {
                Ok(()) => {
                    c.record.set_stored_checksum(fresh);
                    written.push(c.path.clone());
                }
                Err(e) => failed.push(e),
            }
        }

        if failed.is_empty() {
            self.state = PairState::Committed;
            info!("{}: committed {} copies", K::label(), written.len());
            Ok(())
        } else {
            Err(CommitError { written, failed })
        }
    }
}

/// Re-read a single copy from disk, bypassing the in-memory state.
pub fn read_copy<K: RecordKind>(path: &Path) -> Result<Record<K>, SaveError> {
    let buf = read_whole(path)?;
    Ok(Record::<K>::decode(&buf).map_err(|e| e.at(path))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::AUTOSAVE_HAMMERS_OFF;
    use crate::error::IoError;
    use crate::record::{crc32_be, AutoSave, GOLDEN_HAMMERS};
    use std::fs;

    fn unique_root(prefix: &str) -> PathBuf {
        let pid = std::process::id();
        let t = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("bsave-{}-{}-{}", prefix, pid, t))
    }

    fn autosave_file(hammers: u8) -> Vec<u8> {
        let mut p = vec![0x5Au8; AutoSave::payload_len()];
        p[AUTOSAVE_HAMMERS_OFF] = hammers;
        let t = crc32_be(&p);
        p.extend_from_slice(&t);
        p
    }

    fn write_pair(root: &Path, a: &[u8], b: &[u8]) -> (PathBuf, PathBuf) {
        fs::create_dir_all(root).unwrap();
        let pa = AutoSave::copy_path(root, 0);
        let pb = AutoSave::copy_path(root, 1);
        fs::write(&pa, a).unwrap();
        fs::write(&pb, b).unwrap();
        (pa, pb)
    }

    #[test]
    fn load_clean_pair_has_no_warnings() {
        let root = unique_root("pair-clean");
        let f = autosave_file(3);
        let (pa, pb) = write_pair(&root, &f, &f);

        let pair = RedundantPair::<AutoSave>::load(&pa, &pb).unwrap();
        assert_eq!(pair.state(), PairState::Loaded);
        assert_eq!(pair.len(), 2);
        assert!(pair.validate().is_empty());
        assert_eq!(pair.primary().golden_hammers(), 3);
    }

    #[test]
    fn divergence_follows_in_memory_bytes() {
        let root = unique_root("pair-flip");
        let f = autosave_file(1);
        write_pair(&root, &f, &f);
        let mut pair = RedundantPair::<AutoSave>::load_from_dir(&root).unwrap();

        pair.copy_mut(1).unwrap().record.opaque_mut("unknown1").unwrap()[0] ^= 0x80;
        let w = pair.validate();
        assert_eq!(w.iter().filter(|w| w.is_copy_divergence()).count(), 1);
        assert_eq!(pair.state(), PairState::Dirty);

        pair.copy_mut(1).unwrap().record.opaque_mut("unknown1").unwrap()[0] ^= 0x80;
        assert!(pair.validate().iter().all(|w| !w.is_copy_divergence()));
    }

    #[test]
    fn set_field_then_commit_clears_mismatch() {
        let root = unique_root("pair-commit");
        let f = autosave_file(3);
        let (pa, pb) = write_pair(&root, &f, &f);
        let mut pair = RedundantPair::<AutoSave>::load(&pa, &pb).unwrap();

        pair.set_field(GOLDEN_HAMMERS, 9).unwrap();
        assert_eq!(pair.state(), PairState::Dirty);
        // до commit stored CRC старый — ожидаемое расхождение
        assert_eq!(
            pair.validate().iter().filter(|w| w.is_checksum_mismatch()).count(),
            2
        );

        pair.commit(false).unwrap();
        assert_eq!(pair.state(), PairState::Committed);
        assert!(pair.validate().is_empty());

        for p in [&pa, &pb] {
            let r = read_copy::<AutoSave>(p).unwrap();
            assert_eq!(r.golden_hammers(), 9);
            assert!(r.checksum_ok());
        }
    }

    #[test]
    fn rejected_value_leaves_copies_untouched() {
        let root = unique_root("pair-reject");
        let f = autosave_file(4);
        write_pair(&root, &f, &f);
        let mut pair = RedundantPair::<AutoSave>::load_from_dir(&root).unwrap();

        let err = pair.set_field(GOLDEN_HAMMERS, 300).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { value: 300, .. }));
        assert_eq!(pair.state(), PairState::Loaded);
        assert_eq!(pair.copy(1).unwrap().record.golden_hammers(), 4);
    }

    #[test]
    fn partial_commit_reports_written_and_failed() {
        let root = unique_root("pair-partial");
        let f = autosave_file(2);
        let (pa, pb) = write_pair(&root, &f, &f);
        let mut pair = RedundantPair::<AutoSave>::load(&pa, &pb).unwrap();
        pair.set_field(GOLDEN_HAMMERS, 5).unwrap();

        // вторая копия указывает в несуществующий каталог — запись обязана упасть
        let missing_dir = root.join("gone");
        pair.copy_mut(1).unwrap().path = missing_dir.join("autosv1.bin");

        let err = pair.commit(false).unwrap_err();
        assert_eq!(err.written, vec![pa.clone()]);
        assert_eq!(err.failed.len(), 1);
        assert_eq!(err.failed[0].path(), &missing_dir.join("autosv1.bin"));
        assert_eq!(pair.state(), PairState::Dirty);

        // первая копия на диске уже новая, вторая в памяти всё ещё со старым CRC
        assert_eq!(read_copy::<AutoSave>(&pa).unwrap().golden_hammers(), 5);
        let w = pair.validate();
        assert_eq!(w.len(), 1);
        assert!(matches!(w[0], Warning::ChecksumMismatch { index: 1, .. }));
    }

    #[test]
    fn missing_second_copy_is_named() {
        let root = unique_root("pair-missing");
        fs::create_dir_all(&root).unwrap();
        fs::write(AutoSave::copy_path(&root, 0), autosave_file(0)).unwrap();

        match RedundantPair::<AutoSave>::load_from_dir(&root) {
            Err(SaveError::Io(IoError::NotFound { path })) => {
                assert_eq!(path, AutoSave::copy_path(&root, 1))
            }
            other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn empty_path_list_is_rejected() {
        match RedundantPair::<AutoSave>::load_copies(&[]) {
            Err(SaveError::NoCopies { record }) => assert_eq!(record, "AutoSave"),
            other => panic!("expected NoCopies, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn warning_text_matches_report_wording() {
        let w = Warning::CopyDivergence {
            record: "AutoSave",
            index: 1,
            other: 0,
            path: PathBuf::from("/x/autosv1.bin"),
            other_path: PathBuf::from("/x/autosv0.bin"),
            first_offset: 0x15B0,
        };
        assert_eq!(
            w.to_string(),
            "autosv0.bin is NOT THE SAME as autosv1.bin! (first difference at payload offset 0x15B0)"
        );

        let w = Warning::ChecksumMismatch {
            record: "AutoSave",
            index: 0,
            path: PathBuf::from("/x/autosv0.bin"),
            stored: 1,
            computed: 2,
        };
        assert!(w.to_string().starts_with("AutoSave0 checksum mismatch!"));
    }
}
