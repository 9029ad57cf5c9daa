use std::path::{Path, PathBuf};

/// Resolve the runtipi working directory.
///
/// Priority:
/// 1. `--root` flag / `RUNTIPI_ROOT` env var (passed in as `explicit`)
/// 2. Fall back to `cwd`
///
/// Relative paths are anchored at `cwd` so the result is always absolute.
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(p) => resolve_path(p),
        None => current_dir(),
    }
}

/// Anchor a user-supplied path at the current directory.
pub fn resolve_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        current_dir().join(path)
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
