use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest.
pub const SECRET_LEN: usize = 32;

/// Derive a stable secret from `label` and `seed`.
///
/// The secret is the first [`SECRET_LEN`] hex characters of
/// `SHA-256(label || seed)`. Only call this when no value for the secret has
/// been persisted yet; live secrets are carried forward, not re-derived.
pub fn derive(label: &str, seed: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(label.as_bytes());
    hasher.update(seed.as_bytes());
    let mut secret = hex::encode(hasher.finalize());
    secret.truncate(SECRET_LEN);
    secret
}
