//! Load-time estimate from stylesheet and script savings

use serde::{Deserialize, Serialize};

use crate::config::PerformanceSettings;

/// Fixed Core Web Vitals note attached to every estimate
pub const CORE_WEB_VITALS_NOTE: &str = "Improved LCP, CLS, FID";

/// Estimated effect of removing unused code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceEstimate {
    pub css_savings_percent: f64,
    pub js_savings_percent: f64,
    /// Unweighted mean of the two savings percentages
    pub combined_savings_percent: f64,
    pub baseline_seconds: f64,
    pub optimized_seconds: f64,
    /// Share of the baseline removed, after capping or fallback
    pub improvement_percent: f64,
    /// Display form, e.g. `1.2s → 1.0s`
    pub estimated_load_time: String,
    pub core_web_vitals: String,
}

/// Estimate load time from selector counts and the script savings percentage
///
/// # Examples
///
/// ```
/// use deadweight::analyzer::performance::estimate;
/// use deadweight::config::PerformanceSettings;
///
/// let estimate = estimate(10, 9, 20, &PerformanceSettings::default());
/// assert_eq!(estimate.combined_savings_percent, 15.0);
/// assert_eq!(estimate.estimated_load_time, "1.2s → 1.0s");
/// ```
pub fn estimate(
    total_selectors: usize,
    used_selectors: usize,
    js_savings_percent: u32,
    settings: &PerformanceSettings,
) -> PerformanceEstimate {
    let css_savings_percent = if total_selectors == 0 {
        0.0
    } else {
        total_selectors.saturating_sub(used_selectors) as f64 / total_selectors as f64 * 100.0
    };
    let js_savings_percent = f64::from(js_savings_percent);
    let combined = (css_savings_percent + js_savings_percent) / 2.0;

    let improvement_percent = if combined.is_finite() && combined > 0.0 {
        combined.min(settings.max_improvement_percent)
    } else {
        settings.fallback_improvement_percent
    };

    let baseline = settings.baseline_seconds;
    let optimized_seconds = baseline * (1.0 - improvement_percent / 100.0);

    PerformanceEstimate {
        css_savings_percent,
        js_savings_percent,
        combined_savings_percent: combined,
        baseline_seconds: baseline,
        optimized_seconds,
        improvement_percent,
        estimated_load_time: format!("{:.1}s → {:.1}s", baseline, optimized_seconds),
        core_web_vitals: CORE_WEB_VITALS_NOTE.to_string(),
    }
}
