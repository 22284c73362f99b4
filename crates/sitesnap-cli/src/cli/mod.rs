//! CLI for the sitesnap website screenshot tool.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sitesnap_core::config;
use sitesnap_core::registry::{PageCount, WebsiteRegistry};
use std::path::PathBuf;

use commands::{run_add, run_capture, run_list, run_remove, run_schedule, run_set_pages};

/// Top-level CLI for the sitesnap screenshot tool.
#[derive(Debug, Parser)]
#[command(name = "sitesnap")]
#[command(about = "sitesnap: scheduled website screenshot capture", long_about = None)]
pub struct Cli {
    /// Registry file to use instead of the default XDG location.
    #[arg(long, global = true, value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Screenshot output root to use instead of the configured one.
    #[arg(long, global = true, value_name = "DIR")]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List registered websites and their page settings.
    List,

    /// Register a website for capture.
    Add {
        /// Website URL; `https://` is assumed when no scheme is given.
        url: String,

        /// Scroll positions to capture: 1 or 2.
        #[arg(long, default_value = "2")]
        pages: PageCount,
    },

    /// Remove a website by its listing number.
    Remove {
        /// 1-based number from `sitesnap list`.
        index: usize,
    },

    /// Change how many pages are captured for a website.
    SetPages {
        /// 1-based number from `sitesnap list`.
        index: usize,

        /// Scroll positions to capture: 1 or 2.
        pages: PageCount,
    },

    /// Capture every registered website now.
    Run,

    /// Capture every registered website daily at a fixed Eastern time.
    Schedule {
        /// Trigger time as HH:MM, overriding the configured default.
        #[arg(long, value_name = "HH:MM")]
        at: Option<String>,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let registry = match cli.registry {
            Some(path) => WebsiteRegistry::new(path),
            None => WebsiteRegistry::new(WebsiteRegistry::default_path()?),
        };
        let output_root = cli.output.unwrap_or_else(|| cfg.output_root.clone());

        match cli.command {
            CliCommand::List => run_list(&registry)?,
            CliCommand::Add { url, pages } => run_add(&registry, &url, pages)?,
            CliCommand::Remove { index } => run_remove(&registry, index)?,
            CliCommand::SetPages { index, pages } => run_set_pages(&registry, index, pages)?,
            CliCommand::Run => run_capture(&cfg, &registry, &output_root)?,
            CliCommand::Schedule { at } => {
                run_schedule(&cfg, &registry, &output_root, at.as_deref())?
            }
        }

        Ok(())
    }
}
