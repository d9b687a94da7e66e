#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! deadweight library
//!
//! Static usage analysis over a captured page snapshot: which stylesheet
//! rules and scripts the page never uses, what a purged stylesheet and a
//! trimmed script bundle look like, and how much load time removing them
//! could save. It can be used programmatically in addition to the CLI.
//!
//! # Basic Example
//!
//! Analyzing a snapshot built in memory:
//!
//! ```
//! use deadweight::engine::AnalysisEngine;
//! use deadweight::snapshot::{AssetFile, Snapshot};
//!
//! let snapshot = Snapshot {
//!     markup: r#"<div class="a"></div>"#.to_string(),
//!     used_classes: vec!["a".to_string()],
//!     css_assets: vec![AssetFile::new("site.css", ".a{color:red}.b{color:blue}")],
//!     js_assets: vec![AssetFile::new("app.js", "el.attachEvent('onload', init);")],
//!     ..Snapshot::default()
//! };
//!
//! let result = AnalysisEngine::default().analyze(&snapshot)?;
//!
//! assert_eq!(result.css.unused_classes, vec!["b".to_string()]);
//! assert!(result.css.optimized_css.contains(".a"));
//! assert_eq!(result.javascript.unused_file_names, vec!["app.js".to_string()]);
//! # Ok::<(), deadweight::engine::EngineError>(())
//! ```
//!
//! # Advanced Example: Degraded Results
//!
//! With `fallback = "degrade"` a failing stage is replaced by synthetic data
//! and the result is tagged:
//!
//! ```
//! use deadweight::config::{AnalysisConfig, FallbackPolicy};
//! use deadweight::engine::{AnalysisEngine, Stage};
//! use deadweight::snapshot::{AssetFile, Snapshot};
//!
//! let mut config = AnalysisConfig {
//!     fallback: FallbackPolicy::Degrade,
//!     ..AnalysisConfig::default()
//! };
//! config.css.max_input_bytes = 8;
//!
//! let snapshot = Snapshot {
//!     css_assets: vec![AssetFile::new("site.css", ".a{color:red}.b{color:blue}")],
//!     ..Snapshot::default()
//! };
//!
//! let result = AnalysisEngine::new(config).analyze(&snapshot)?;
//! assert!(result.degraded);
//! assert_eq!(result.degraded_stages, vec![Stage::Css]);
//! assert_eq!(result.css.total_selectors, 354);
//! # Ok::<(), deadweight::engine::EngineError>(())
//! ```

/// Usage analysis components
pub mod analyzer;
/// Command-line interface definition
pub mod cli;
/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file management
pub mod config;
/// Analysis orchestration and stage fallback
pub mod engine;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem access
pub mod infra;
/// Spinner for long-running analyses
pub mod progress;
/// Console and JSON reports
pub mod report;
/// Snapshot input model and loading
pub mod snapshot;
