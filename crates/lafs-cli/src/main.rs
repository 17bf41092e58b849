//! `lafs` - generate latent factor simulation datasets from a TOML config.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

/// LAFS - synthetic recommender output for fairness experiments
#[derive(Parser, Debug)]
#[command(name = "lafs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a dataset and write its CSV files
    Generate {
        /// Configuration file (TOML)
        #[arg(short, long, env = "LAFS_CONFIG")]
        config: PathBuf,

        /// Seed of the random source, overriding the config
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output directory, overriding the config
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Load and validate a configuration without generating
    Validate {
        /// Configuration file (TOML)
        #[arg(short, long, env = "LAFS_CONFIG")]
        config: PathBuf,

        /// Print the effective parameters as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            config,
            seed,
            output_dir,
        } => {
            let mut config = commands::load_config(&config)?;
            init_tracing(&config.logging.level);
            if seed.is_some() {
                config.seed = seed;
            }
            if let Some(dir) = output_dir {
                config.output.dir = dir;
            }
            commands::generate(&config)
        }
        Command::Validate { config, json } => {
            let config = commands::load_config(&config)?;
            init_tracing(&config.logging.level);
            commands::validate(&config, json)
        }
    }
}
