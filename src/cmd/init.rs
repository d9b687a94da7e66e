//! Init command implementation
//!
//! Handles `deadweight init`, which writes a `.deadweight.toml` holding the
//! default thresholds so they can be tuned per project.

use anyhow::Result;
use console::style;
use std::env;
use std::path::{Path, PathBuf};

use crate::config::{AnalysisConfig, ConfigLoader, CONFIG_FILE_NAME};
use crate::error::DeadweightError;
use crate::fmt::{INFO, ROCKET, SPARKLES};

/// Write the default configuration into the current directory
///
/// # Examples
///
/// ```no_run
/// use deadweight::cmd::init::cmd_init;
///
/// // Fails if .deadweight.toml already exists
/// cmd_init(false)?;
///
/// // Restore defaults over an existing file
/// cmd_init(true)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_init(force: bool) -> Result<()> {
    println!(
        "{} {} Initializing deadweight",
        ROCKET,
        style("deadweight init").bold()
    );
    println!();

    let project_root = env::current_dir()?;
    let path = init_config(&project_root, force)?;

    println!(
        "{} Created {}",
        SPARKLES,
        style(path.display()).bold().cyan()
    );
    println!(
        "{}  Edit the thresholds, or set {} to keep going when a stage fails.",
        INFO,
        style("fallback = \"degrade\"").green()
    );

    Ok(())
}

/// Save a default config in `dir`, returning its path
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn init_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);

    if !force && ConfigLoader::exists(dir) {
        return Err(DeadweightError::ConfigExists { path }.into());
    }

    ConfigLoader::save(&AnalysisConfig::default(), dir)?;
    log::debug!("Wrote default configuration to {}", path.display());

    Ok(path)
}
