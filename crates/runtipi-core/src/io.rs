use crate::error::{Result, RuntipiError};
use fs4::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Mode for files read by the user and the orchestrator.
pub const SHARED_FILE_MODE: u32 = 0o644;
/// Mode for files only the owner may read.
pub const PRIVATE_FILE_MODE: u32 = 0o600;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// Prevents partial writes from corrupting state files. The result has
/// [`SHARED_FILE_MODE`].
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    atomic_write_with_mode(path, data, SHARED_FILE_MODE)
}

/// Like [`atomic_write`], with explicit unix permissions. `mode` is ignored
/// on other platforms.
pub fn atomic_write_with_mode(path: &Path, data: &[u8], mode: u32) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    let _ = mode;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Create a directory and all parents, idempotent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(path)?;
    Ok(())
}

/// Write a file only if it does not already exist. Returns true if written.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write(path, data)?;
    Ok(true)
}

/// Read a file to a string, returning `None` when it does not exist.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(RuntipiError::ReadFile {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Exclusive advisory lock held on a lock file until dropped.
#[derive(Debug)]
pub struct StateLock {
    path: PathBuf,
    _file: File,
}

impl StateLock {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Block until an exclusive lock on `path` is acquired, creating the file if needed.
pub fn lock_file(path: &Path) -> Result<StateLock> {
    let locked = |source| RuntipiError::StateLocked {
        path: path.to_path_buf(),
        source,
    };
    let file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(path)
        .map_err(locked)?;
    file.lock_exclusive().map_err(locked)?;
    Ok(StateLock {
        path: path.to_path_buf(),
        _file: file,
    })
}
