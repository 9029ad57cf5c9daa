//! Builds the resolved `.env` from defaults, settings, derived secrets,
//! previously persisted values and an optional overlay file.
//!
//! Precedence, lowest to highest: built-in defaults, settings.json, carried
//! forward secrets, overlay. The overlay always wins for the keys it defines.
//! Only the two generated secrets are carried forward from the previous
//! `.env`; every other key is recomputed on each run.

use crate::defaults::*;
use crate::entropy;
use crate::env::EnvMap;
use crate::error::{Result, RuntipiError};
use crate::host::HostProbe;
use crate::io;
use crate::paths;
use crate::seed;
use crate::settings::Settings;
use serde::Serialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

pub mod keys {
    pub const INTERNAL_IP: &str = "INTERNAL_IP";
    pub const ARCHITECTURE: &str = "ARCHITECTURE";
    pub const TIPI_VERSION: &str = "TIPI_VERSION";
    pub const ROOT_FOLDER_HOST: &str = "ROOT_FOLDER_HOST";
    pub const NGINX_PORT: &str = "NGINX_PORT";
    pub const NGINX_PORT_SSL: &str = "NGINX_PORT_SSL";
    pub const RUNTIPI_APP_DATA_PATH: &str = "RUNTIPI_APP_DATA_PATH";
    pub const POSTGRES_HOST: &str = "POSTGRES_HOST";
    pub const POSTGRES_PORT: &str = "POSTGRES_PORT";
    pub const POSTGRES_DBNAME: &str = "POSTGRES_DBNAME";
    pub const POSTGRES_USERNAME: &str = "POSTGRES_USERNAME";
    pub const POSTGRES_PASSWORD: &str = "POSTGRES_PASSWORD";
    pub const REDIS_HOST: &str = "REDIS_HOST";
    pub const REDIS_PASSWORD: &str = "REDIS_PASSWORD";
    pub const DOMAIN: &str = "DOMAIN";
    pub const LOCAL_DOMAIN: &str = "LOCAL_DOMAIN";

    /// Every key guaranteed to be present after materialization.
    pub const REQUIRED: [&str; 16] = [
        INTERNAL_IP,
        ARCHITECTURE,
        TIPI_VERSION,
        ROOT_FOLDER_HOST,
        NGINX_PORT,
        NGINX_PORT_SSL,
        RUNTIPI_APP_DATA_PATH,
        POSTGRES_HOST,
        POSTGRES_PORT,
        POSTGRES_DBNAME,
        POSTGRES_USERNAME,
        POSTGRES_PASSWORD,
        REDIS_HOST,
        REDIS_PASSWORD,
        DOMAIN,
        LOCAL_DOMAIN,
    ];

    /// Keys whose values are generated secrets.
    pub const SECRETS: [&str; 2] = [POSTGRES_PASSWORD, REDIS_PASSWORD];
}

// ---------------------------------------------------------------------------
// ResolvedEnvironment
// ---------------------------------------------------------------------------

/// The environment written by [`materialize`], together with where it lives.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedEnvironment {
    pub env_file: PathBuf,
    pub env: EnvMap,
}

impl ResolvedEnvironment {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.env.get(key)
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Compute and persist the resolved environment for the instance at `root`.
///
/// Fails fast: the first error aborts the run and the previous `.env` is left
/// as it was. Bootstrap files created before the failure are kept. Holds an
/// exclusive lock on `state/.lock` for the whole run.
pub fn materialize(
    root: &Path,
    overlay: Option<&Path>,
    probe: &dyn HostProbe,
) -> Result<ResolvedEnvironment> {
    let env_file = paths::env_path(root);
    let settings_file = paths::settings_path(root);

    io::ensure_dir(&paths::state_dir(root))?;
    let _lock = io::lock_file(&paths::lock_path(root))?;
    if io::write_if_missing(&env_file, b"")? {
        tracing::debug!(path = %env_file.display(), "created empty env file");
    }
    if io::write_if_missing(&settings_file, b"{}")? {
        tracing::debug!(path = %settings_file.display(), "created empty settings file");
    }

    let seed = seed::ensure_seed(root)?;

    let current = match EnvMap::load(&env_file) {
        Ok(current) => current,
        Err(e) => {
            tracing::warn!(error = %e, "could not read existing env file, starting from scratch");
            EnvMap::new()
        }
    };

    let settings = Settings::load(&settings_file)?;
    let version = read_version(root);

    let postgres_password = carry_or_derive(
        &current,
        keys::POSTGRES_PASSWORD,
        POSTGRES_PASSWORD_LABEL,
        &seed,
    );
    let redis_password =
        carry_or_derive(&current, keys::REDIS_PASSWORD, REDIS_PASSWORD_LABEL, &seed);

    let app_data_path = resolve_data_path(root, &settings)?;
    let root_folder = root.to_string_lossy().into_owned();

    let mut env = EnvMap::new();
    env.insert(
        keys::INTERNAL_IP,
        or_else(settings.internal_ip(), || probe.internal_ip()),
    );
    env.insert(keys::ARCHITECTURE, probe.architecture());
    env.insert(keys::TIPI_VERSION, version);
    env.insert(keys::ROOT_FOLDER_HOST, root_folder);
    env.insert(keys::NGINX_PORT, or_default(settings.nginx_port(), DEFAULT_NGINX_PORT));
    env.insert(
        keys::NGINX_PORT_SSL,
        or_default(settings.nginx_ssl_port(), DEFAULT_NGINX_PORT_SSL),
    );
    env.insert(keys::RUNTIPI_APP_DATA_PATH, app_data_path);
    env.insert(keys::POSTGRES_HOST, POSTGRES_HOST);
    env.insert(
        keys::POSTGRES_PORT,
        or_default(settings.postgres_port(), DEFAULT_POSTGRES_PORT),
    );
    env.insert(keys::POSTGRES_DBNAME, POSTGRES_DBNAME);
    env.insert(keys::POSTGRES_USERNAME, POSTGRES_USERNAME);
    env.insert(keys::POSTGRES_PASSWORD, postgres_password);
    env.insert(keys::REDIS_HOST, REDIS_HOST);
    env.insert(keys::REDIS_PASSWORD, redis_password);
    env.insert(
        keys::DOMAIN,
        or_default(settings.domain.clone().unwrap_or_default(), DEFAULT_DOMAIN),
    );
    env.insert(
        keys::LOCAL_DOMAIN,
        or_default(settings.local_domain.clone().unwrap_or_default(), DEFAULT_LOCAL_DOMAIN),
    );

    if let Some(overlay) = overlay {
        let text = std::fs::read_to_string(overlay).map_err(|source| RuntipiError::ReadFile {
            path: overlay.to_path_buf(),
            source,
        })?;
        let custom = EnvMap::parse(&text);
        tracing::debug!(path = %overlay.display(), keys = custom.len(), "applying env overlay");
        env.overlay(&custom);
    }

    env.save(&env_file)?;
    tracing::debug!(path = %env_file.display(), keys = env.len(), "wrote env file");

    Ok(ResolvedEnvironment { env_file, env })
}

fn read_version(root: &Path) -> String {
    match io::read_optional(&paths::version_path(root)) {
        Ok(Some(v)) if !v.trim().is_empty() => v.trim().to_string(),
        Ok(_) => DEFAULT_VERSION.to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read VERSION, using {DEFAULT_VERSION}");
            DEFAULT_VERSION.to_string()
        }
    }
}

fn carry_or_derive(current: &EnvMap, key: &str, label: &str, seed: &str) -> String {
    match current.get_non_empty(key) {
        Some(existing) => existing.to_string(),
        None => {
            tracing::debug!(key, "deriving secret from seed");
            entropy::derive(label, seed)
        }
    }
}

fn resolve_data_path(root: &Path, settings: &Settings) -> Result<String> {
    let Some(configured) = settings.data_path() else {
        return Ok(root.to_string_lossy().into_owned());
    };
    let path = Path::new(configured);
    if path != root && !root.join(path).exists() {
        return Err(RuntipiError::DataPathMissing(path.to_path_buf()));
    }
    Ok(configured.to_string())
}

fn or_default(value: String, default: &str) -> String {
    or_else(value, || default.to_string())
}

fn or_else(value: String, default: impl FnOnce() -> String) -> String {
    if value.is_empty() {
        default()
    } else {
        value
    }
}
