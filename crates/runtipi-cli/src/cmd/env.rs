use crate::output::{print_json, print_pairs};
use anyhow::Context;
use clap::Subcommand;
use runtipi_core::env::EnvMap;
use runtipi_core::materialize::keys;
use runtipi_core::paths;
use std::path::Path;

const MASK: &str = "********";

#[derive(Subcommand)]
pub enum EnvSubcommand {
    /// Show every key in the generated .env file
    Show {
        /// Print secret values instead of masking them
        #[arg(long)]
        reveal: bool,
    },
    /// Print the value of a single key
    Get {
        /// Key name (e.g. DOMAIN)
        key: String,
    },
}

pub fn run(root: &Path, subcmd: EnvSubcommand, json: bool) -> anyhow::Result<()> {
    let env = load(root)?;
    match subcmd {
        EnvSubcommand::Show { reveal } => show(&env, reveal, json),
        EnvSubcommand::Get { key } => get(&env, &key, json),
    }
}

fn load(root: &Path) -> anyhow::Result<EnvMap> {
    let path = paths::env_path(root);
    if !path.exists() {
        anyhow::bail!(
            "no .env file at {}: run 'runtipi start' first",
            path.display()
        );
    }
    EnvMap::load(&path).with_context(|| format!("failed to read {}", path.display()))
}

fn show(env: &EnvMap, reveal: bool, json: bool) -> anyhow::Result<()> {
    let visible: EnvMap = env
        .iter()
        .map(|(k, v)| {
            let masked = !reveal && keys::SECRETS.iter().any(|s| *s == k) && !v.is_empty();
            (k, if masked { MASK } else { v })
        })
        .collect();

    if json {
        return print_json(&visible);
    }

    if visible.is_empty() {
        println!("The .env file is empty.");
        return Ok(());
    }

    let pairs: Vec<(&str, &str)> = visible.iter().collect();
    print_pairs(&pairs);
    Ok(())
}

fn get(env: &EnvMap, key: &str, json: bool) -> anyhow::Result<()> {
    let value = env
        .get(key)
        .with_context(|| format!("key not set: {key}"))?;

    if json {
        print_json(&serde_json::json!({ "key": key, "value": value }))
    } else {
        println!("{value}");
        Ok(())
    }
}
