//! Configuration file data structures

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::analyzer::selectors::DEFAULT_MAX_RULES;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".deadweight.toml";

/// What the engine does when a whole analysis stage fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Return the stage error to the caller
    #[default]
    Fail,
    /// Substitute a fixed synthetic result and mark the run degraded
    Degrade,
}

/// deadweight configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Stage failure policy
    pub fallback: FallbackPolicy,

    /// Stylesheet analysis settings
    pub css: CssSettings,

    /// Script classification settings
    pub js: JsSettings,

    /// Load-time estimate settings
    pub performance: PerformanceSettings,

    /// Platform detection and risk settings
    pub platform: PlatformSettings,
}

/// Stylesheet analysis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CssSettings {
    /// Rule matches examined per stylesheet
    pub max_rules: usize,

    /// Largest concatenated stylesheet text accepted, in bytes
    pub max_input_bytes: u64,
}

impl Default for CssSettings {
    fn default() -> Self {
        Self {
            max_rules: DEFAULT_MAX_RULES,
            max_input_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Script classification settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct JsSettings {
    /// Size above which a file with few lines counts as a minified blob
    pub large_file_bytes: u64,

    /// Line count below which a large file counts as a minified blob
    pub large_file_max_lines: usize,

    /// Smallest plausible size of the jQuery core file
    pub min_jquery_core_bytes: u64,

    /// Characters of each retained file shown in the optimized bundle
    pub preview_chars: usize,

    /// Bound on classification worker threads (rayon global pool when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
}

impl Default for JsSettings {
    fn default() -> Self {
        Self {
            large_file_bytes: 100_000,
            large_file_max_lines: 50,
            min_jquery_core_bytes: 10_000,
            preview_chars: 500,
            workers: None,
        }
    }
}

/// Load-time estimate settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PerformanceSettings {
    /// Assumed load time before optimization, in seconds
    pub baseline_seconds: f64,

    /// Upper bound on the claimed improvement
    pub max_improvement_percent: f64,

    /// Improvement applied when savings are not a finite positive number
    pub fallback_improvement_percent: f64,
}

impl Default for PerformanceSettings {
    fn default() -> Self {
        Self {
            baseline_seconds: 1.2,
            max_improvement_percent: 80.0,
            fallback_improvement_percent: 20.0,
        }
    }
}

/// Platform detection and risk settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PlatformSettings {
    /// Derive platform signals from the snapshot when the provider sent none
    pub detect: bool,

    /// Plugin count above which the site is flagged
    pub max_plugins: usize,

    /// Oldest platform version not reported as outdated
    pub min_version: f64,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            detect: true,
            max_plugins: 10,
            min_version: 6.0,
        }
    }
}

impl AnalysisConfig {
    /// Validate that thresholds are usable
    ///
    /// # Examples
    ///
    /// ```
    /// use deadweight::config::AnalysisConfig;
    ///
    /// let mut config = AnalysisConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.performance.max_improvement_percent = 120.0;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.css.max_rules == 0 {
            anyhow::bail!("css.max-rules must be at least 1");
        }

        if self.js.workers == Some(0) {
            anyhow::bail!("js.workers must be at least 1 when set");
        }

        let perf = &self.performance;
        if !(perf.baseline_seconds.is_finite() && perf.baseline_seconds > 0.0) {
            anyhow::bail!(
                "performance.baseline-seconds must be positive, got {}",
                perf.baseline_seconds
            );
        }

        for (name, value) in [
            ("max-improvement-percent", perf.max_improvement_percent),
            (
                "fallback-improvement-percent",
                perf.fallback_improvement_percent,
            ),
        ] {
            if !(0.0..=100.0).contains(&value) {
                anyhow::bail!(
                    "performance.{} must be between 0 and 100, got {}",
                    name,
                    value
                );
            }
        }

        Ok(())
    }
}
