//! Platform (WordPress) risk assessment
//!
//! Pure over [`PlatformSignals`]: turns the detected theme, plugins, core
//! files and version into issues and recommendations.

use serde::{Deserialize, Serialize};

use super::leading_version;
use crate::config::PlatformSettings;

/// Plugin name fragments associated with heavy front-end payloads
pub const HEAVY_PLUGIN_KEYWORDS: &[&str] = &["page-builder", "slider", "social", "backup"];

/// Active theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Active plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl PluginInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            path: None,
        }
    }
}

/// Platform evidence gathered from a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformSignals {
    #[serde(alias = "is_wordpress")]
    pub is_platform: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeInfo>,
    pub plugins: Vec<PluginInfo>,
    /// Asset URLs under platform-owned paths, in asset order
    pub core_files: Vec<String>,
}

/// Signals plus the derived issues and recommendations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformReport {
    #[serde(flatten)]
    pub signals: PlatformSignals,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Assess platform signals
///
/// # Examples
///
/// ```
/// use deadweight::analyzer::platform::{assess, PlatformSignals};
/// use deadweight::config::PlatformSettings;
///
/// let signals = PlatformSignals {
///     is_platform: true,
///     version: Some("5.8.3".to_string()),
///     ..PlatformSignals::default()
/// };
///
/// let report = assess(&signals, &PlatformSettings::default());
/// assert_eq!(report.issues, vec!["WordPress version 5.8.3 is outdated"]);
/// assert_eq!(report.recommendations, vec!["Update WordPress to the latest version"]);
/// ```
pub fn assess(signals: &PlatformSignals, settings: &PlatformSettings) -> PlatformReport {
    let mut report = PlatformReport {
        signals: signals.clone(),
        ..PlatformReport::default()
    };

    if !signals.is_platform {
        return report;
    }

    let plugin_count = signals.plugins.len();
    if plugin_count > settings.max_plugins {
        report.issues.push(format!(
            "Too many plugins ({}). Consider reducing the number of active plugins.",
            plugin_count
        ));
        report
            .recommendations
            .push("Audit plugins and remove unnecessary ones".to_string());
    }

    let heavy: Vec<&str> = signals
        .plugins
        .iter()
        .map(|p| p.name.as_str())
        .filter(|name| HEAVY_PLUGIN_KEYWORDS.iter().any(|kw| name.contains(kw)))
        .collect();
    if !heavy.is_empty() {
        report.issues.push(format!(
            "Potentially heavy plugins detected: {}",
            heavy.join(", ")
        ));
        report
            .recommendations
            .push("Consider lightweight alternatives for heavy plugins".to_string());
    }

    if signals.core_files.iter().any(|f| f.contains("jquery")) {
        report
            .recommendations
            .push("Consider removing jQuery if not needed for modern themes".to_string());
    }

    if let Some(version) = &signals.version {
        if leading_version(version).is_some_and(|v| v < settings.min_version) {
            report
                .issues
                .push(format!("WordPress version {} is outdated", version));
            report
                .recommendations
                .push("Update WordPress to the latest version".to_string());
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wordpress() -> PlatformSignals {
        PlatformSignals {
            is_platform: true,
            ..PlatformSignals::default()
        }
    }

    #[test]
    fn test_non_platform_has_no_findings() {
        let signals = PlatformSignals {
            is_platform: false,
            version: Some("4.0".to_string()),
            plugins: (0..20).map(|i| PluginInfo::new(format!("p{}", i))).collect(),
            ..PlatformSignals::default()
        };
        let report = assess(&signals, &PlatformSettings::default());
        assert!(report.issues.is_empty());
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_plugin_count_threshold_is_exclusive() {
        let settings = PlatformSettings::default();
        let mut signals = wordpress();
        signals.plugins = (0..10).map(|i| PluginInfo::new(format!("p{}", i))).collect();
        assert!(assess(&signals, &settings).issues.is_empty());

        signals.plugins.push(PluginInfo::new("p10"));
        let report = assess(&signals, &settings);
        assert_eq!(
            report.issues,
            vec!["Too many plugins (11). Consider reducing the number of active plugins."]
        );
        assert_eq!(report.recommendations, vec!["Audit plugins and remove unnecessary ones"]);
    }

    #[test]
    fn test_heavy_plugins_named_in_order() {
        let mut signals = wordpress();
        signals.plugins = ["contact-form", "revslider", "social-share", "updraft-backup"]
            .into_iter()
            .map(PluginInfo::new)
            .collect();

        let report = assess(&signals, &PlatformSettings::default());
        assert_eq!(
            report.issues,
            vec!["Potentially heavy plugins detected: revslider, social-share, updraft-backup"]
        );
    }

    #[test]
    fn test_jquery_core_file_recommendation() {
        let mut signals = wordpress();
        signals.core_files = vec!["https://s.com/wp-includes/js/jquery/jquery.min.js".to_string()];
        let report = assess(&signals, &PlatformSettings::default());
        assert!(report.issues.is_empty());
        assert_eq!(
            report.recommendations,
            vec!["Consider removing jQuery if not needed for modern themes"]
        );
    }

    #[test]
    fn test_version_at_minimum_is_current() {
        let mut signals = wordpress();
        signals.version = Some("6.0".to_string());
        assert!(assess(&signals, &PlatformSettings::default()).issues.is_empty());

        signals.version = Some("6.4.2".to_string());
        assert!(assess(&signals, &PlatformSettings::default()).issues.is_empty());

        signals.version = Some("unknown".to_string());
        assert!(assess(&signals, &PlatformSettings::default()).issues.is_empty());
    }

    #[test]
    fn test_signals_accept_is_wordpress_alias() {
        let signals: PlatformSignals =
            serde_json::from_str(r#"{"is_wordpress": true, "plugins": [{"name": "akismet"}]}"#)
                .unwrap();
        assert!(signals.is_platform);
        assert_eq!(signals.plugins[0].name, "akismet");
    }
}
