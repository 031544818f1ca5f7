//! `propdexctl`: index, inspect and load propeller test datasets.
#![allow(missing_docs)]

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "propdexctl",
    version,
    about = "Reconstruct per-propeller records from wind-tunnel file names"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Index a dataset root and print the catalog as JSON
    Scan {
        /// Directory holding the volume directories (overrides PROPDEX_ROOT)
        #[arg(long)]
        root: Option<PathBuf>,
        /// TOML or JSON config file (defaults to PROPDEX_CONFIG_PATH and friends)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
        /// Include dropped files and their reasons in the output
        #[arg(long)]
        include_dropped: bool,
    },
    /// Parse file names without touching the disk
    Parse {
        /// Data file names (extension stripped) or photo file names
        #[arg(required = true)]
        names: Vec<String>,
        /// Treat the names as photo file names
        #[arg(long)]
        image: bool,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Index the dataset, then load every table and photo of one propeller
    Load {
        /// Canonical identifier, e.g. apcsf_9x4.7
        #[arg(long)]
        id: String,
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries JSON; logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan {
            root,
            config,
            pretty,
            include_dropped,
        } => commands::scan(root, config, pretty, include_dropped),
        Command::Parse {
            names,
            image,
            config,
        } => commands::parse(&names, image, config),
        Command::Load { id, root, config } => commands::load(&id, root, config),
    }
}
