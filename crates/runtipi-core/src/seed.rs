//! Persisted random seed used as input to secret derivation.
//!
//! The seed is 32 bytes from the operating system's secure random source,
//! hex-encoded to 64 characters and written once to `state/seed`. Existing
//! seeds are returned as-is, without validating their length or format.

use crate::error::{Result, RuntipiError};
use crate::io;
use crate::paths;
use rand::rngs::OsRng;
use rand::RngCore;
use std::path::Path;

pub const SEED_BYTES: usize = 32;

/// Return the seed for `root`, creating it on first use.
pub fn ensure_seed(root: &Path) -> Result<String> {
    let path = paths::seed_path(root);
    if path.exists() {
        return read_seed(root);
    }

    let mut bytes = [0u8; SEED_BYTES];
    OsRng.try_fill_bytes(&mut bytes)?;
    let seed = hex::encode(bytes);

    io::ensure_dir(&paths::state_dir(root))?;
    io::atomic_write_with_mode(&path, seed.as_bytes(), io::PRIVATE_FILE_MODE)?;
    tracing::info!(path = %path.display(), "generated new seed");
    Ok(seed)
}

/// Read the existing seed verbatim.
///
/// The seed is hashed as text, so a file that is not valid UTF-8 is reported
/// as a [`RuntipiError::ReadFile`] rather than silently altered.
pub fn read_seed(root: &Path) -> Result<String> {
    let path = paths::seed_path(root);
    std::fs::read_to_string(&path).map_err(|source| RuntipiError::ReadFile { path, source })
}
