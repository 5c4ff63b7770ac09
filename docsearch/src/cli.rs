/// This module implements the CLI interface for docsearch—command parsing,
/// argument validation and the async entrypoint.
///
/// All pipeline logic (extraction, record building, publishing) lives in the
/// [`docsearch-core`] crate. This module is strictly CLI glue: it loads the
/// YAML config, picks the publisher (networked or dry-run) and invokes the
/// core pipeline.
///
/// ## How To Use
/// - For command-line users: use the installed `docsearch` binary with
///   `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed
///   [`Cli`].
///
/// [`docsearch-core`]: ../../docsearch-core/
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use docsearch_core::publisher::DryRunPublisher;
use docsearch_core::synchronise::synchronise;

use crate::algolia::AlgoliaClient;
use crate::load_config::load_config;

/// CLI for docsearch: index generated documentation into a hosted search index.
#[derive(Parser)]
#[clap(
    name = "docsearch",
    version,
    about = "Crawl generated documentation pages and synchronise their outline into a hosted search index"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Index all documentation pages using the given config file
    Sync {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Print records to stdout instead of writing to the search index
        #[clap(long)]
        dry_run: bool,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Sync { config, dry_run } => {
            let config = load_config(config)?;
            config.trace_loaded();
            tracing::info!(command = "sync", dry_run, "Starting index synchronisation");

            let report = if dry_run {
                synchronise(&config, &DryRunPublisher::new()).await
            } else {
                let publisher = AlgoliaClient::new_from_env().map_err(|e| {
                    anyhow::Error::msg(format!("Failed to construct search client from env: {e}"))
                })?;
                synchronise(&config, &publisher).await
            };

            match report {
                Ok(report) => {
                    tracing::info!(command = "sync", ?report, "Synchronisation complete");
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "sync", error = %e, "Synchronisation failed");
                    Err(anyhow::Error::new(e))
                }
            }
        }
    }
}
