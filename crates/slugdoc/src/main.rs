//! Slugdoc CLI - inspect slug-addressed markdown content.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "slugdoc")]
#[command(about = "Resolve, transform and enumerate slug-addressed markdown content")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to slugdoc.toml config file
    #[arg(short, long, default_value = "slugdoc.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a config file and sample content
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// List every slug each content root can serve
    Routes {
        /// Only list this root
        root: Option<String>,

        /// Print JSON instead of one route per line
        #[arg(long)]
        json: bool,
    },

    /// Show a document's metadata and outline
    Show {
        /// Content root name (e.g. "blog")
        root: String,

        /// Document slug (e.g. "2024/hello"); empty for the landing page
        #[arg(default_value = "")]
        slug: String,

        /// Print the full document, tree included, as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a document's heading outline
    Outline {
        /// Content root name
        root: String,

        /// Document slug; empty for the landing page
        #[arg(default_value = "")]
        slug: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Routes { root, json } => {
            let config = config::load_config(&cli.config)?;
            commands::routes::run(&config, root.as_deref(), json)?;
        }
        Commands::Show { root, slug, json } => {
            let config = config::load_config(&cli.config)?;
            commands::show::run(&config, &root, &slug, json)?;
        }
        Commands::Outline { root, slug } => {
            let config = config::load_config(&cli.config)?;
            commands::outline::run(&config, &root, &slug)?;
        }
    }

    Ok(())
}
