//! apidoc: generate versioned Markdown API reference pages from the JSON
//! emitted by a Leafdoc-style comment parser.
//!
//! One run renders the newest release tags of a cached repository clone,
//! then the current checkout, and writes a sidebar manifest listing them:
//!
//! - `apidoc` reuses the existing clone as-is
//! - `apidoc --pull` clones it on first use and fetches all tags

mod aggregate;
mod compose;
mod config;
mod inherit;
mod model;
mod reader;
mod render;
mod slug;
mod versions;

use anyhow::Result;
use clap::Parser;
use config::{CliSettings, Config};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use versions::repo::GitRepository;
use versions::Pipeline;

#[derive(Parser)]
#[command(
    name = "apidoc",
    about = "Generate versioned Markdown API reference pages from Leafdoc JSON"
)]
struct Cli {
    /// Clone the repository cache if missing and fetch all tags
    #[arg(long)]
    pull: bool,

    /// Configuration file (default: ./apidoc.toml when present)
    #[arg(short = 'c', long, env = "APIDOC_CONFIG")]
    config: Option<PathBuf>,

    /// Version of the current checkout (default: version in package.json)
    #[arg(long)]
    current_version: Option<String>,

    /// Project checkout rendered as the current version
    #[arg(long)]
    project_dir: Option<PathBuf>,

    /// Number of historical releases to render; 0 renders only the current checkout
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => {
            info!("completed generating API documentation");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("error generating API documentation: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// --verbose selects DEBUG, otherwise RUST_LOG or INFO.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(
        cli.config.as_deref(),
        CliSettings {
            project_dir: cli.project_dir,
            current_version: cli.current_version,
            tags_limit: cli.limit,
        },
    )?;

    let pipeline = Pipeline::from_config(&config)?;
    let mut repo = GitRepository::new(
        config.repository.url.as_str(),
        config.repository.cache_dir.as_path(),
    );
    info!("building API documentation");
    pipeline.run(&mut repo, cli.pull)?;
    Ok(())
}
