use crate::output::{print_json, print_pairs};
use crate::root;
use anyhow::Context;
use clap::Args;
use runtipi_core::host::SystemProbe;
use runtipi_core::materialize::{keys, materialize, ResolvedEnvironment};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct StartArgs {
    /// Path to a custom .env file. Can be relative to the current directory or absolute.
    #[arg(short, long)]
    pub env_file: Option<PathBuf>,
}

pub fn run(root: &Path, args: StartArgs, json: bool) -> anyhow::Result<()> {
    let resolved = generate(root, &args)?;
    report(&resolved, "Generated", json)
}

pub fn restart(root: &Path, args: StartArgs, json: bool) -> anyhow::Result<()> {
    let resolved = generate(root, &args)?;
    report(&resolved, "Regenerated", json)
}

fn generate(root: &Path, args: &StartArgs) -> anyhow::Result<ResolvedEnvironment> {
    let overlay = args.env_file.as_deref().map(root::resolve_path);
    materialize(root, overlay.as_deref(), &SystemProbe).context("failed to generate .env file")
}

fn report(resolved: &ResolvedEnvironment, verb: &str, json: bool) -> anyhow::Result<()> {
    let value = |key: &str| resolved.get(key).unwrap_or_default().to_string();

    if json {
        let summary = serde_json::json!({
            "env_file": resolved.env_file,
            "version": value(keys::TIPI_VERSION),
            "internal_ip": value(keys::INTERNAL_IP),
            "nginx_port": value(keys::NGINX_PORT),
            "domain": value(keys::DOMAIN),
            "local_domain": value(keys::LOCAL_DOMAIN),
        });
        return print_json(&summary);
    }

    println!("{verb} {}", resolved.env_file.display());
    print_pairs(&[
        ("version", value(keys::TIPI_VERSION)),
        ("architecture", value(keys::ARCHITECTURE)),
        ("data path", value(keys::RUNTIPI_APP_DATA_PATH)),
        (
            "dashboard",
            format!(
                "http://{}:{}",
                value(keys::INTERNAL_IP),
                value(keys::NGINX_PORT)
            ),
        ),
        ("local domain", value(keys::LOCAL_DOMAIN)),
    ]);
    Ok(())
}
