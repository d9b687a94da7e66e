//! Analysis engine
//!
//! Runs the complete analysis over one snapshot:
//! 1. Stylesheet track: extract, classify and rebuild
//! 2. Script track: classify every file and aggregate the bundle
//! 3. Performance estimate from both tracks
//! 4. Platform assessment from provided or detected signals
//!
//! The two tracks run concurrently on the rayon pool. A failing track either
//! aborts the run or, under the degrade policy, is replaced by fixed
//! synthetic data and recorded in the result.

pub mod error;
pub mod fallback;

pub use error::EngineError;

use serde::{Deserialize, Serialize};

use crate::analyzer::bundle::{self, BundleReport};
use crate::analyzer::css::{self, CssSummary};
use crate::analyzer::js;
use crate::analyzer::performance::{self, PerformanceEstimate};
use crate::analyzer::platform::{self, PlatformReport};
use crate::analyzer::platform_detect::detect_platform;
use crate::analyzer::usage::{UsageContext, UsedClassSet};
use crate::config::{AnalysisConfig, FallbackPolicy};
use crate::snapshot::Snapshot;

/// Analysis stage that can fail as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Css,
    Js,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css => write!(f, "css"),
            Self::Js => write!(f, "js"),
        }
    }
}

/// Complete outcome of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
    pub css: CssSummary,
    pub javascript: BundleReport,
    pub performance: PerformanceEstimate,
    /// Present only when the page runs on the platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformReport>,
    /// True when any stage was replaced by synthetic data
    pub degraded: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded_stages: Vec<Stage>,
}

/// Runs analyses with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    config: AnalysisConfig,
}

impl AnalysisEngine {
    /// Create an engine with the given configuration
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a snapshot
    ///
    /// # Examples
    ///
    /// ```
    /// use deadweight::engine::AnalysisEngine;
    /// use deadweight::snapshot::{AssetFile, Snapshot};
    ///
    /// let snapshot = Snapshot {
    ///     markup: r#"<div class="a"></div>"#.to_string(),
    ///     used_classes: vec!["a".to_string()],
    ///     css_assets: vec![AssetFile::new("site.css", ".a{color:red}.b{color:blue}")],
    ///     ..Snapshot::default()
    /// };
    ///
    /// let result = AnalysisEngine::default().analyze(&snapshot)?;
    /// assert_eq!(result.css.used_selectors, 1);
    /// assert!(!result.degraded);
    /// # Ok::<(), deadweight::engine::EngineError>(())
    /// ```
    pub fn analyze(&self, snapshot: &Snapshot) -> Result<AnalysisResult, EngineError> {
        let config = &self.config;
        let css_files = snapshot.css_files();
        let js_files = snapshot.js_files();
        let ctx = UsageContext::new(UsedClassSet::new(&snapshot.used_classes), &snapshot.markup);

        log::debug!(
            "Analyzing {} stylesheets and {} scripts",
            css_files.len(),
            js_files.len()
        );

        let (css_outcome, js_outcome) = rayon::join(
            || css::analyze_css(&css_files, &ctx, &snapshot.used_classes, &config.css),
            || {
                js::classify_all(&js_files, &config.js)
                    .map(|verdicts| bundle::aggregate(verdicts, &js_files, config.js.preview_chars))
            },
        );

        let mut degraded_stages = Vec::new();

        let css = match css_outcome {
            Ok(summary) => summary,
            Err(err) => {
                degraded_stages.push(self.degrade(err.into())?);
                fallback::css_summary(&snapshot.used_classes)
            }
        };
        log::debug!(
            "Stylesheet track: {}/{} selector groups used",
            css.used_selectors,
            css.total_selectors
        );

        let javascript = match js_outcome {
            Ok(report) => report,
            Err(err) => {
                degraded_stages.push(self.degrade(err.into())?);
                fallback::bundle_report(js_files.len())
            }
        };
        log::debug!(
            "Script track: {}/{} files retained",
            javascript.used_files,
            javascript.total_files
        );

        let performance = performance::estimate(
            css.total_selectors,
            css.used_selectors,
            javascript.savings_percent,
            &config.performance,
        );

        let signals = match &snapshot.platform {
            Some(signals) => Some(signals.clone()),
            None if config.platform.detect => Some(detect_platform(snapshot)),
            None => None,
        };
        let platform = signals
            .filter(|s| s.is_platform)
            .map(|s| platform::assess(&s, &config.platform));

        Ok(AnalysisResult {
            page_url: snapshot.page_url.clone(),
            css,
            javascript,
            performance,
            platform,
            degraded: !degraded_stages.is_empty(),
            degraded_stages,
        })
    }

    /// Apply the fallback policy to a stage failure, returning the degraded stage
    fn degrade(&self, err: EngineError) -> Result<Stage, EngineError> {
        match self.config.fallback {
            FallbackPolicy::Fail => Err(err),
            FallbackPolicy::Degrade => {
                log::warn!("{}; substituting synthetic {} results", err, err.stage());
                Ok(err.stage())
            }
        }
    }
}
