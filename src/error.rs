//! Error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes and recovery actions
//! - Proper exit codes for CI/CD
//!
//! # Examples
//!
//! ```no_run
//! use deadweight::error::DeadweightError;
//! use deadweight::snapshot::SnapshotLoader;
//! use std::path::Path;
//!
//! match SnapshotLoader::load(Path::new("snapshot.json")) {
//!     Ok(snapshot) => println!("{} scripts captured", snapshot.js_files().len()),
//!     Err(e) => {
//!         eprintln!("{}", e);
//!         if let Some(help) = e.suggestion() {
//!             eprintln!("help: {}", help);
//!         }
//!         std::process::exit(e.exit_code());
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::engine::EngineError;

/// deadweight errors with contextual suggestions
#[derive(Error, Debug)]
pub enum DeadweightError {
    /// Snapshot file could not be read
    #[error("Snapshot not found: {path}")]
    SnapshotNotFound {
        /// Path to the snapshot
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Snapshot file is not valid snapshot JSON
    #[error("Invalid snapshot: {path}")]
    InvalidSnapshot {
        /// Path to the snapshot
        path: PathBuf,
        #[source]
        /// JSON error source
        source: serde_json::Error,
    },

    /// Configuration file could not be used
    #[error("Invalid configuration in {path}: {message}")]
    InvalidConfig {
        /// Path to the config file
        path: PathBuf,
        /// Parse or validation failure
        message: String,
    },

    /// `init` would overwrite an existing configuration
    #[error("Configuration already exists: {path}")]
    ConfigExists {
        /// Path to the existing file
        path: PathBuf,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Analysis stage failure
    #[error("analysis error: {0}")]
    Engine(#[from] EngineError),
}

impl DeadweightError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use deadweight::error::DeadweightError;
    /// use std::path::PathBuf;
    ///
    /// let error = DeadweightError::ConfigExists {
    ///     path: PathBuf::from(".deadweight.toml"),
    /// };
    ///
    /// assert!(error.suggestion().unwrap().contains("--force"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::SnapshotNotFound { path, .. } => Some(format!(
                "Check that {} exists and is readable",
                path.display()
            )),
            Self::InvalidSnapshot { .. } => Some(
                "A snapshot is a JSON object with at least a \"markup\" string, plus optional \
                 \"used_classes\", \"css_assets\" and \"js_assets\" arrays"
                    .to_string(),
            ),
            Self::InvalidConfig { .. } => Some(
                "Fix the reported setting, or run 'deadweight init --force' to restore defaults"
                    .to_string(),
            ),
            Self::ConfigExists { .. } => {
                Some("Pass --force to overwrite the existing configuration".to_string())
            }
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
            Self::Engine(EngineError::CssStage(_)) => Some(
                "Raise css.max-input-bytes in .deadweight.toml, or pass --degrade to continue \
                 with synthetic stylesheet results"
                    .to_string(),
            ),
            Self::Engine(EngineError::JsStage(_)) => Some(
                "Lower or remove js.workers in .deadweight.toml, or pass --degrade to continue \
                 with synthetic script results"
                    .to_string(),
            ),
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Returns Unix-style exit codes following sysexits.h conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use deadweight::error::DeadweightError;
    /// use std::path::PathBuf;
    ///
    /// let error = DeadweightError::SnapshotNotFound {
    ///     path: PathBuf::from("missing.json"),
    ///     source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
    /// };
    ///
    /// assert_eq!(error.exit_code(), 66); // EX_NOINPUT
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::SnapshotNotFound { .. } => 66, // EX_NOINPUT
            Self::InvalidSnapshot { .. } => 65,  // EX_DATAERR
            Self::InvalidConfig { .. } => 78,    // EX_CONFIG
            Self::ConfigExists { .. } => 73,     // EX_CANTCREAT
            Self::Io { .. } => 74,               // EX_IOERR
            Self::Engine(_) => 1,                // Generic error (analysis failed)
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with cause chain and suggestions
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(suggestion) = Self::find(error).and_then(DeadweightError::suggestion) {
            output.push_str(&format!(
                "\n{} {}\n",
                style("help:").cyan().bold(),
                suggestion
            ));
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        Self::find(error).map_or(1, DeadweightError::exit_code)
    }

    /// First `DeadweightError` in the chain, if any
    fn find(error: &anyhow::Error) -> Option<&DeadweightError> {
        error
            .chain()
            .find_map(|cause| cause.downcast_ref::<DeadweightError>())
    }
}
