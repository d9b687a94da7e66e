//! Analyze command implementation
//!
//! Handles `deadweight analyze <SNAPSHOT>`: loads the configuration and the
//! snapshot, runs the engine and prints or exports the results.

use anyhow::Result;
use console::style;
use std::env;
use std::path::Path;

use crate::config::{AnalysisConfig, ConfigLoader, FallbackPolicy, CONFIG_FILE_NAME};
use crate::engine::{AnalysisEngine, AnalysisResult};
use crate::error::DeadweightError;
use crate::fmt::{CHECKMARK, MICROSCOPE};
use crate::infra::{FileSystem, RealFileSystem};
use crate::progress::Spinner;
use crate::report;
use crate::snapshot::SnapshotLoader;

/// Purged stylesheet written by `--out-dir`
pub const PURGED_CSS_FILE: &str = "purged.css";

/// Retained-script bundle written by `--out-dir`
pub const OPTIMIZED_JS_FILE: &str = "optimized.js";

/// Analyze a snapshot and report the results
///
/// # Examples
///
/// ```no_run
/// use deadweight::cmd::analyze::cmd_analyze;
/// use std::path::Path;
///
/// // Console report
/// cmd_analyze(Path::new("snapshot.json"), false, None, false)?;
///
/// // JSON, exporting purged.css and optimized.js into ./out
/// cmd_analyze(Path::new("snapshot.json"), true, Some(Path::new("out")), false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_analyze(
    snapshot_path: &Path,
    json: bool,
    out_dir: Option<&Path>,
    degrade: bool,
) -> Result<()> {
    let project_root = env::current_dir()?;
    let config = load_config(&project_root, degrade)?;

    if !json {
        println!(
            "{} {} {}",
            MICROSCOPE,
            style("deadweight analyze").bold(),
            style(snapshot_path.display()).dim()
        );
    }

    let result = run_analysis(snapshot_path, config, !json)?;

    if json {
        println!("{}", report::format_json_report(&result)?);
    } else {
        print!("{}", report::format_console_report(&result)?);
    }

    if let Some(dir) = out_dir {
        write_artifacts_with_fs(&result, dir, &RealFileSystem)?;
        if !json {
            println!(
                "{} Wrote {} and {} to {}",
                CHECKMARK,
                style(PURGED_CSS_FILE).cyan(),
                style(OPTIMIZED_JS_FILE).cyan(),
                style(dir.display()).bold()
            );
        }
    }

    Ok(())
}

/// Load `.deadweight.toml` from `dir`, forcing the degrade policy when asked
pub fn load_config(dir: &Path, degrade: bool) -> Result<AnalysisConfig> {
    let mut config = ConfigLoader::load(dir).map_err(|e| DeadweightError::InvalidConfig {
        path: dir.join(CONFIG_FILE_NAME),
        message: format!("{:#}", e),
    })?;

    if degrade {
        config.fallback = FallbackPolicy::Degrade;
    }
    Ok(config)
}

/// Load a snapshot and run the engine over it
pub fn run_analysis(
    snapshot_path: &Path,
    config: AnalysisConfig,
    show_progress: bool,
) -> Result<AnalysisResult> {
    let spinner = Spinner::start(show_progress, "Loading snapshot...");
    let snapshot = SnapshotLoader::load(snapshot_path)?;

    spinner.set_message(format!(
        "Analyzing {} stylesheets and {} scripts...",
        snapshot.css_files().len(),
        snapshot.js_files().len()
    ));
    let result = AnalysisEngine::new(config)
        .analyze(&snapshot)
        .map_err(DeadweightError::from)?;
    spinner.finish();

    Ok(result)
}

/// Write the purged stylesheet and retained-script bundle into `dir`
pub fn write_artifacts_with_fs<FS: FileSystem>(
    result: &AnalysisResult,
    dir: &Path,
    fs: &FS,
) -> Result<(), DeadweightError> {
    let io_error = |context: String| {
        move |source: std::io::Error| DeadweightError::Io { context, source }
    };

    fs.create_dir_all(dir)
        .map_err(io_error(format!("creating {}", dir.display())))?;

    let css_path = dir.join(PURGED_CSS_FILE);
    fs.write(&css_path, &result.css.optimized_css)
        .map_err(io_error(format!("writing {}", css_path.display())))?;

    let js_path = dir.join(OPTIMIZED_JS_FILE);
    fs.write(&js_path, &result.javascript.optimized_js)
        .map_err(io_error(format!("writing {}", js_path.display())))?;

    log::debug!("Artifacts written to {}", dir.display());
    Ok(())
}
