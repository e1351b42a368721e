use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use brawlsave::consts::{AUTOSAVE_HAMMERS_OFF, AUTOSAVE_PAYLOAD_LEN};
use brawlsave::record::{crc32_be, GOLDEN_HAMMERS};
use brawlsave::{SaveFile, Warning};

#[test]
fn counter_only_difference_is_one_divergence() -> Result<()> {
    let root = unique_root("diverge");
    fs::create_dir_all(&root)?;

    // копии отличаются только счётчиком, CRC каждой корректен
    fs::write(root.join("autosv0.bin"), build_autosave(3, 11))?;
    fs::write(root.join("autosv1.bin"), build_autosave(4, 11))?;

    let save = SaveFile::open(&root)?;
    let w = save.load_warnings();
    assert_eq!(w.iter().filter(|w| w.is_copy_divergence()).count(), 1);
    assert_eq!(w.iter().filter(|w| w.is_checksum_mismatch()).count(), 0);

    match &w[0] {
        Warning::CopyDivergence {
            record,
            index,
            other,
            first_offset,
            ..
        } => {
            assert_eq!(*record, "AutoSave");
            assert_eq!((*index, *other), (1, 0));
            assert_eq!(*first_offset, AUTOSAVE_HAMMERS_OFF);
        }
        other => panic!("unexpected warning {:?}", other),
    }

    let report = save.report();
    assert!(report.contains("WARNING: autosv0.bin is NOT THE SAME as autosv1.bin!"));
    // отчёт рендерит первую копию
    assert!(report.contains("Golden Hammers: 3"));
    Ok(())
}

#[test]
fn divergence_is_reported_not_repaired() -> Result<()> {
    let root = unique_root("diverge-keep");
    fs::create_dir_all(&root)?;
    let a = build_autosave(1, 21);
    let mut b = a.clone();
    // один байт в opaque области + пересчёт CRC второй копии
    b[100] ^= 0xFF;
    let t = crc32_be(&b[..AUTOSAVE_PAYLOAD_LEN]);
    b[AUTOSAVE_PAYLOAD_LEN..].copy_from_slice(&t);
    fs::write(root.join("autosv0.bin"), &a)?;
    fs::write(root.join("autosv1.bin"), &b)?;

    let mut save = SaveFile::open(&root)?;
    assert_eq!(save.load_warnings().len(), 1);

    // мутация не копирует одну копию поверх другой
    save.set_counter(2)?;
    let w = save.warnings();
    assert_eq!(w.len(), 1);
    assert!(w[0].is_copy_divergence());

    let b_disk = fs::read(root.join("autosv1.bin"))?;
    assert_eq!(b_disk[100], b[100]);
    assert_eq!(b_disk[AUTOSAVE_HAMMERS_OFF], 2);
    Ok(())
}

#[test]
fn in_memory_flip_and_revert() -> Result<()> {
    let root = unique_root("diverge-flip");
    fs::create_dir_all(&root)?;
    let f = build_autosave(0, 31);
    fs::write(root.join("autosv0.bin"), &f)?;
    fs::write(root.join("autosv1.bin"), &f)?;

    let mut save = SaveFile::open(&root)?;
    assert!(save.warnings().is_empty());

    {
        let copy = save.autosave_mut().copy_mut(0).unwrap();
        copy.record.opaque_mut("unknown2").unwrap()[0] ^= 0x01;
    }
    assert!(save.warnings().iter().any(|w| w.is_copy_divergence()));

    {
        let copy = save.autosave_mut().copy_mut(0).unwrap();
        copy.record.opaque_mut("unknown2").unwrap()[0] ^= 0x01;
    }
    assert!(save.warnings().iter().all(|w| !w.is_copy_divergence()));
    assert!(save.warnings().is_empty());

    // set_field через пару тоже не даёт расхождения
    save.autosave_mut().set_field(GOLDEN_HAMMERS, 5)?;
    assert!(save.warnings().iter().all(|w| !w.is_copy_divergence()));
    Ok(())
}

#[test]
fn checksum_mismatch_in_one_copy() -> Result<()> {
    let root = unique_root("crc-bad");
    fs::create_dir_all(&root)?;
    let f = build_autosave(3, 41);
    let mut bad = f.clone();
    let n = bad.len();
    bad[n - 1] ^= 0xFF; // испорченный трейлер, payload тот же
    fs::write(root.join("autosv0.bin"), &f)?;
    fs::write(root.join("autosv1.bin"), &bad)?;

    let mut save = SaveFile::open(&root)?;
    let w = save.load_warnings().to_vec();
    assert_eq!(w.len(), 1);
    assert!(matches!(w[0], Warning::ChecksumMismatch { index: 1, .. }));
    assert!(save.report().contains("WARNING: AutoSave1 checksum mismatch!"));

    // commit после set_counter освежает CRC обеих копий
    save.set_counter(3)?;
    assert!(save.warnings().is_empty());
    assert_eq!(fs::read(root.join("autosv1.bin"))?, f);
    Ok(())
}

// ---------- helpers ----------

fn build_autosave(hammers: u8, seed: u128) -> Vec<u8> {
    let mut rng = oorandom::Rand64::new(seed);
    let mut p: Vec<u8> = (0..AUTOSAVE_PAYLOAD_LEN).map(|_| rng.rand_u64() as u8).collect();
    p[AUTOSAVE_HAMMERS_OFF] = hammers;
    let t = crc32_be(&p);
    p.extend_from_slice(&t);
    p
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let base = std::env::temp_dir();
    base.join(format!("bsave-copy-divergence-{prefix}-{pid}-{t}-{id}"))
}
