mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{env::EnvSubcommand, start::StartArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "runtipi",
    about = "Manage your runtipi instance",
    version,
    propagate_version = true
)]
struct Cli {
    /// Runtipi installation directory (default: current directory)
    #[arg(long, global = true, env = "RUNTIPI_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Show debug logs
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the environment and start your runtipi instance
    Start(StartArgs),

    /// Regenerate the environment and restart your runtipi instance
    Restart(StartArgs),

    /// Inspect the generated environment file
    Env {
        #[command(subcommand)]
        subcommand: EnvSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Start(args) => cmd::start::run(&root, args, cli.json),
        Commands::Restart(args) => cmd::start::restart(&root, args, cli.json),
        Commands::Env { subcommand } => cmd::env::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
