use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File layout, relative to the working directory
// ---------------------------------------------------------------------------

pub const STATE_DIR: &str = "state";
pub const SEED_FILE: &str = "state/seed";
pub const SETTINGS_FILE: &str = "state/settings.json";
pub const LOCK_FILE: &str = "state/.lock";
pub const ENV_FILE: &str = ".env";
pub const VERSION_FILE: &str = "VERSION";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn state_dir(root: &Path) -> PathBuf {
    root.join(STATE_DIR)
}

pub fn seed_path(root: &Path) -> PathBuf {
    root.join(SEED_FILE)
}

pub fn settings_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE)
}

pub fn lock_path(root: &Path) -> PathBuf {
    root.join(LOCK_FILE)
}

pub fn env_path(root: &Path) -> PathBuf {
    root.join(ENV_FILE)
}

pub fn version_path(root: &Path) -> PathBuf {
    root.join(VERSION_FILE)
}
