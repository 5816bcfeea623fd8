//! CLI for jpxdl.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use jpxdl_core::config::{self, JpxConfig};
use std::path::{Path, PathBuf};

use commands::{run_checksum, run_feeds, run_list_feeds, run_resolve};

/// Top-level CLI for jpxdl.
#[derive(Debug, Parser)]
#[command(name = "jpxdl")]
#[command(about = "jpxdl: fetch JPX listing pages and save the linked data files", long_about = None)]
pub struct Cli {
    /// Read configuration from PATH instead of ~/.config/jpxdl/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve and download every configured feed (or only those named).
    Run {
        /// Only run the named feed; repeat for several.
        #[arg(long = "feed", value_name = "NAME")]
        feeds: Vec<String>,
        /// Root directory for feed output directories (overrides config).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Print the run summary as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Resolve one feed's file link and print it without downloading.
    Resolve {
        /// Feed name, as listed by `jpxdl feeds`.
        name: String,
    },

    /// List configured feeds.
    Feeds,

    /// Compute SHA-256 of a file (e.g. a downloaded data file).
    Checksum {
        /// Path to the file.
        path: String,
    },
}

fn load_config(path: Option<&Path>) -> Result<JpxConfig> {
    let cfg = match path {
        Some(p) => config::load_from_path(p)?,
        None => {
            let cfg = config::load_or_init()?;
            cfg.validate()?;
            cfg
        }
    };
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Run {
                feeds,
                output_dir,
                json,
            } => {
                let cfg = load_config(cli.config.as_deref())?;
                run_feeds(&cfg, &feeds, output_dir.as_deref(), json)?;
            }
            CliCommand::Resolve { name } => {
                let cfg = load_config(cli.config.as_deref())?;
                run_resolve(&cfg, &name)?;
            }
            CliCommand::Feeds => {
                let cfg = load_config(cli.config.as_deref())?;
                run_list_feeds(&cfg);
            }
            CliCommand::Checksum { path } => run_checksum(Path::new(&path))?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
