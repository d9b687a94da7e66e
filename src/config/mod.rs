//! Configuration for deadweight
//!
//! This module provides:
//! - The `.deadweight.toml` file structure and its defaults
//! - Threshold validation
//! - Loading and saving through the filesystem abstraction

pub mod file;
pub mod loader;

pub use file::{
    AnalysisConfig, CssSettings, FallbackPolicy, JsSettings, PerformanceSettings,
    PlatformSettings, CONFIG_FILE_NAME,
};
pub use loader::ConfigLoader;
