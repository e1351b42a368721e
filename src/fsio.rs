// src/fsio.rs
//
// Whole-buffer file I/O for record copies.
//
// Политика:
// - Чтение: файл читается целиком, handle живёт только внутри вызова.
// - Запись: tmp+rename (файл заменяется целиком, частичных записей не бывает),
//   затем fsync родительского каталога (best‑effort, только unix).
// - Права существующего файла переносятся на замену; read-only файл не перезаписывается.

use std::fs::{self, OpenOptions};
#[cfg(unix)]
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::consts::TMP_SUFFIX;
use crate::error::IoError;

/// Read a whole file. A missing file is `IoError::NotFound` naming that file.
pub fn read_whole(path: &Path) -> Result<Vec<u8>, IoError> {
    let mut f = OpenOptions::new().read(true).open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            IoError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf).map_err(|e| IoError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!("read {} ({} B)", path.display(), buf.len());
    Ok(buf)
}

/// Replace `path` with `bytes` via `<name>.tmp` + rename.
/// `sync` = fsync the tmp file before rename and the parent directory after.
///
/// A read-only target is `WriteFailed` (PermissionDenied) and stays untouched;
/// otherwise the replacement gets the target's permissions.
pub fn replace_whole(path: &Path, bytes: &[u8], sync: bool) -> Result<(), IoError> {
    let wrap = |source: io::Error| IoError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let perms = match fs::metadata(path) {
        Ok(m) => Some(m.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(wrap(e)),
    };
    if perms.as_ref().is_some_and(|p| p.readonly()) {
        return Err(wrap(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "file is read-only",
        )));
    }

    let tmp = tmp_path_for(path);
    let _ = fs::remove_file(&tmp); // best‑effort

    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&tmp)
        .map_err(wrap)?;
    let written = f.write_all(bytes).and_then(|_| if sync { f.sync_all() } else { Ok(()) });
    drop(f);
    let prepared = written.and_then(|_| match perms {
        Some(p) => fs::set_permissions(&tmp, p),
        None => Ok(()),
    });
    if let Err(e) = prepared {
        let _ = fs::remove_file(&tmp);
        return Err(wrap(e));
    }

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(wrap(e));
    }
    if sync {
        let _ = fsync_parent_dir(path);
    }
    debug!("wrote {} ({} B)", path.display(), bytes.len());
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}.{}", name, TMP_SUFFIX))
}

#[cfg(unix)]
fn fsync_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            let dir = File::open(parent)?;
            dir.sync_all()?;
        }
    }
    Ok(())
}
#[cfg(not(unix))]
fn fsync_parent_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}
