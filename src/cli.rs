//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `lineage`.
#[derive(Debug, Parser)]
#[command(
    name = "lineage",
    version,
    about = "Resolve ancestry between observed blockchain networks"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve and persist the genealogy for one chain.
    Resolve {
        /// Chain identifier whose observations should be resolved.
        #[arg(long = "chain")]
        chain_id: String,
        /// Directory containing deployment artifact JSON files.
        #[arg(long)]
        artifacts: PathBuf,
        /// Assemble the genealogy but skip the persist step.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the collected chain without touching the store or the chain.
    Collect {
        /// Chain identifier whose observations should be collected.
        #[arg(long = "chain")]
        chain_id: String,
        /// Directory containing deployment artifact JSON files.
        #[arg(long)]
        artifacts: PathBuf,
    },
}
