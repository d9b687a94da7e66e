//! Usage analysis components
//!
//! Pure, synchronous building blocks of the analysis:
//! - Selector extraction and usage classification
//! - Stylesheet rebuilding
//! - Per-file script heuristics and the jQuery sub-analyzer
//! - Bundle, performance and platform aggregation

pub mod bundle;
pub mod css;
pub mod jquery;
pub mod js;
pub mod js_rules;
pub mod performance;
pub mod platform;
pub mod platform_detect;
pub mod rebuild;
pub mod selectors;
pub mod usage;

// Public exports for common analyzer types
pub use bundle::BundleReport;
pub use css::{CssStageError, CssSummary};
pub use js::{JsFileVerdict, JsStageError};
pub use js_rules::{Finding, Verdict};
pub use performance::PerformanceEstimate;
pub use platform::{PlatformReport, PlatformSignals, PluginInfo, ThemeInfo};
pub use rebuild::RebuildError;
pub use selectors::{ExtractedSelectors, SelectorGroup};
pub use usage::{UsageContext, UsedClassSet};

/// Major.minor prefix of a dotted version string as a number
///
/// `"5.9.3"` reads as `5.9`, `"6"` as `6.0`; text without a leading digit
/// gives `None`.
pub(crate) fn leading_version(version: &str) -> Option<f64> {
    let mut end = 0;
    let mut dots = 0;
    for (i, c) in version.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if dots == 0 && end > 0 => dots += 1,
            _ => break,
        }
    }
    version[..end].parse().ok()
}
