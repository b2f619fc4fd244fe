use std::fs::{OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Error, Result};

/// Write `text` to `path` in one scoped step.
///
/// The text goes to a sibling temp file that is synced and renamed over the
/// target, so a failed write never leaves a truncated script behind. Once the
/// rename succeeds the script is in place; a failing directory sync after that
/// is logged, not returned.
pub fn write_text_atomic(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path)?;
    let written = write_and_sync(&tmp_path, text.as_bytes())
        .and_then(|()| std::fs::rename(&tmp_path, path));
    if let Err(err) = written {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(Error::Io(err));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            report_dir_sync(parent, sync_dir(parent));
        }
    }

    Ok(())
}

fn report_dir_sync(dir: &Path, result: io::Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            warn!(dir = %dir.display(), error = %err, "directory sync failed after rename");
            false
        }
    }
}

fn write_and_sync(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    file.write_all(data)?;
    file.sync_all()
}

fn temp_path(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::InvalidPath(format!("no file name in {}", path.display())))?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

#[cfg(unix)]
fn sync_dir(path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}
