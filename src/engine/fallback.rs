//! Fixed synthetic results substituted for failed stages
//!
//! Only used under `fallback = "degrade"`. Results built here are always
//! reported as degraded so they can never pass for real measurements.

use crate::analyzer::bundle::{savings_percent, BundleReport};
use crate::analyzer::css::{ordered_unique, CssSummary};

/// Selector total reported by the synthetic stylesheet summary
pub const SYNTHETIC_SELECTOR_TOTAL: usize = 354;

/// File total used when the snapshot carried no scripts
pub const SYNTHETIC_FILE_TOTAL: usize = 12;

/// Synthetic original bundle size (2.4 MB)
pub const SYNTHETIC_ORIGINAL_BYTES: u64 = 2_516_582;

/// Synthetic optimized bundle size (1.1 MB)
pub const SYNTHETIC_OPTIMIZED_BYTES: u64 = 1_153_434;

const SYNTHETIC_UNUSED_CLASSES: &[&str] = &[
    "btn-secondary",
    "sidebar-ads",
    "carousel-control",
    "modal-overlay",
    "dropdown-menu",
    "tooltip",
    "badge-warning",
    "alert-info",
    "card-hover",
    "nav-item",
    "footer-link",
    "social-icon",
    "hero-section",
    "testimonial",
    "pricing-table",
    "contact-form",
    "newsletter-signup",
    "search-box",
    "breadcrumb",
    "pagination",
];

const SYNTHETIC_UNUSED_FILES: &[&str] = &[
    "jquery-ui.min.js",
    "bootstrap.bundle.js",
    "old-plugin.js",
    "unused-carousel.js",
    "deprecated-analytics.js",
    "legacy-form-validator.js",
    "unused-animations.js",
    "old-gallery-plugin.js",
    "deprecated-slider.js",
    "unused-lightbox.js",
];

const SYNTHETIC_BUNDLE: &str = "// Optimized JavaScript Bundle
// Generated by deadweight

// Core functionality
(function() {
  'use strict';

  // Essential functions only
  function initApp() {
    console.log('Optimized app initialized');
  }

  // Event listeners
  document.addEventListener('DOMContentLoaded', initApp);

  // Utility functions
  function debounce(func, wait) {
    let timeout;
    return function executedFunction(...args) {
      const later = () => {
        clearTimeout(timeout);
        func(...args);
      };
      clearTimeout(timeout);
      timeout = setTimeout(later, wait);
    };
  }

  // Export for use
  window.optimizedApp = {
    init: initApp,
    debounce: debounce
  };
})();

// Removed unused files:
// - jquery-ui.min.js (not needed)
// - bootstrap.bundle.js (replaced with custom components)
// - old-plugin.js (deprecated)";

/// Synthetic stylesheet summary built around the applied classes
pub fn css_summary(used_tokens: &[String]) -> CssSummary {
    let tokens = ordered_unique(used_tokens);
    let used = tokens.len().min(SYNTHETIC_SELECTOR_TOTAL);
    let unused_count = SYNTHETIC_SELECTOR_TOTAL - used;

    let unused_classes: Vec<String> = SYNTHETIC_UNUSED_CLASSES
        .iter()
        .take(unused_count)
        .map(|c| c.to_string())
        .collect();
    let optimized_css = sample_stylesheet(&tokens);

    CssSummary {
        total_selectors: SYNTHETIC_SELECTOR_TOTAL,
        used_selectors: used,
        unused_selectors: unused_classes.iter().map(|c| format!(".{}", c)).collect(),
        unused_classes,
        total_class_names: SYNTHETIC_SELECTOR_TOTAL,
        optimized_bytes: optimized_css.len() as u64,
        optimized_css,
        ..CssSummary::default()
    }
}

/// Synthetic bundle report for a snapshot with `file_count` scripts
pub fn bundle_report(file_count: usize) -> BundleReport {
    let total_files = if file_count == 0 {
        SYNTHETIC_FILE_TOTAL
    } else {
        file_count
    };
    let used_files = total_files * 7 / 10;

    BundleReport {
        total_files,
        used_files,
        unused_file_names: SYNTHETIC_UNUSED_FILES
            .iter()
            .take(total_files - used_files)
            .map(|f| f.to_string())
            .collect(),
        original_bytes: SYNTHETIC_ORIGINAL_BYTES,
        optimized_bytes: SYNTHETIC_OPTIMIZED_BYTES,
        savings_percent: savings_percent(SYNTHETIC_ORIGINAL_BYTES, SYNTHETIC_OPTIMIZED_BYTES),
        optimized_js: SYNTHETIC_BUNDLE.to_string(),
        files: Vec::new(),
    }
}

/// One rule per class, with fuller bodies for a few common components
fn sample_stylesheet(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|token| match token.as_str() {
            "btn" => ".btn{color:white;background:red;padding:8px 16px;border-radius:4px}".to_string(),
            "card" => ".card{background:white;border-radius:8px;box-shadow:0 2px 4px rgba(0,0,0,0.1);padding:16px}"
                .to_string(),
            "container" => ".container{max-width:1200px;margin:0 auto;padding:0 16px}".to_string(),
            other => format!(".{}{{/* styles for {} */}}", other, other),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_css_summary_counts() {
        let summary = css_summary(&tokens(&["btn", "hero", "btn"]));
        assert_eq!(summary.total_selectors, 354);
        assert_eq!(summary.used_selectors, 2);
        assert_eq!(summary.unused_classes.len(), 20);
        assert_eq!(summary.unused_selectors[0], ".btn-secondary");
        assert_eq!(
            summary.optimized_css,
            ".btn{color:white;background:red;padding:8px 16px;border-radius:4px}\n.hero{/* styles for hero */}"
        );
    }

    #[test]
    fn test_bundle_report_defaults_to_twelve_files() {
        let report = bundle_report(0);
        assert_eq!(report.total_files, 12);
        assert_eq!(report.used_files, 8);
        assert_eq!(report.unused_file_names.len(), 4);
        assert_eq!(report.savings_percent, 54);
    }

    #[test]
    fn test_bundle_report_scales_with_file_count() {
        let report = bundle_report(50);
        assert_eq!(report.used_files, 35);
        assert_eq!(report.unused_file_names.len(), 10);
        assert!(report.optimized_bytes <= report.original_bytes);
    }

    #[test]
    fn test_synthetic_sizes_display_as_documented() {
        use crate::fmt::format_bytes;
        assert_eq!(format_bytes(SYNTHETIC_ORIGINAL_BYTES), "2.40 MB");
        assert_eq!(format_bytes(SYNTHETIC_OPTIMIZED_BYTES), "1.10 MB");
    }
}
