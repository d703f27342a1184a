// src/main.rs

//! statutebook: Irish Statute Book section-to-PDF crawler CLI

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use statutebook::error::Result;
use statutebook::models::Config;
use statutebook::pipeline::{run_crawler, run_validate};

/// statutebook - Irish Statute Book section crawler
#[derive(Parser, Debug)]
#[command(
    name = "statutebook",
    version,
    about = "Crawls the Irish Statute Book and exports statute sections as PDFs"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl all statutes and write section PDFs
    Crawl {
        /// Output root directory (overrides output.root_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the configuration without crawling
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Crawl { output } => {
            if let Some(path) = output {
                config.output.root_dir = path;
            }
            config.validate()?;
            run_crawler(&config).await?;
        }
        Command::Validate => run_validate(&config)?,
    }

    Ok(())
}
