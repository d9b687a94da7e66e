//! Command-line interface definition

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Static CSS/JS usage analyzer
///
/// deadweight reads a captured page snapshot, finds stylesheet rules and
/// scripts the page never uses, and estimates what removing them would save.
#[derive(Parser, Debug)]
#[command(name = "deadweight", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    pub no_emoji: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a page snapshot
    Analyze {
        /// Snapshot JSON file
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Write purged.css and optimized.js into this directory
        #[arg(short, long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Substitute synthetic results for failed stages instead of failing
        #[arg(long)]
        degrade: bool,
    },

    /// Write a default .deadweight.toml
    Init {
        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
