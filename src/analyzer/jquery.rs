//! jQuery ecosystem sub-analyzer
//!
//! Runs only for files whose name mentions jQuery. Detects the library
//! version, known plugin families and deprecated call patterns.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::js_rules::{Finding, JsFileInput};
use super::leading_version;

/// Primary library file names
const CORE_FILE_NAMES: &[&str] = &["jquery.js", "jquery.min.js"];

/// Versions below this get an update note
const MIN_SUPPORTED_VERSION: f64 = 3.0;

/// Call patterns removed or deprecated in modern jQuery
const DEPRECATED_METHODS: &[&str] = &[
    ".live(",
    ".die(",
    ".browser",
    ".boxModel",
    ".support",
    ".toggle(",
    ".hover(",
    ".bind(",
    ".unbind(",
    ".delegate(",
    ".undelegate(",
];

/// A well-known plugin recognized by file name or content
#[derive(Debug, Clone, Copy)]
pub struct PluginFamily {
    pub name: &'static str,
    /// Substring of the lowercase file name that signals the plugin
    pub file_key: &'static str,
    /// Substring of the content that signals the plugin
    pub content_key: &'static str,
    /// Usage markers; none present means the plugin looks unused
    pub markers: &'static [&'static str],
    pub unused_reason: &'static str,
}

/// Recognized plugin families, in reporting order
pub const PLUGIN_FAMILIES: &[PluginFamily] = &[
    PluginFamily {
        name: "jQuery UI",
        file_key: "ui",
        content_key: "jquery-ui",
        markers: &[
            "widget",
            "draggable",
            "droppable",
            "resizable",
            "sortable",
            "accordion",
            "datepicker",
        ],
        unused_reason: "jQuery UI loaded but no UI components detected in usage",
    },
    PluginFamily {
        name: "jQuery Migrate",
        file_key: "migrate",
        content_key: "jquery-migrate",
        markers: &["jQuery.browser", "jQuery.sub", "jQuery.fn.size"],
        unused_reason: "jQuery Migrate loaded but no deprecated features detected",
    },
    PluginFamily {
        name: "jQuery Validation",
        file_key: "validate",
        content_key: "jquery.validate",
        markers: &[".validate(", "$.validator"],
        unused_reason: "jQuery Validation plugin loaded but no validation usage detected",
    },
    PluginFamily {
        name: "DataTables",
        file_key: "datatables",
        content_key: "datatables",
        markers: &["DataTable(", "dataTable("],
        unused_reason: "DataTables plugin loaded but no table initialization detected",
    },
    PluginFamily {
        name: "Slick Carousel",
        file_key: "slick",
        content_key: "slick",
        markers: &[".slick(", "slick-slider"],
        unused_reason: "Slick carousel loaded but no slider initialization detected",
    },
];

static BANNER_VERSION_RE: OnceLock<Regex> = OnceLock::new();
static FILE_VERSION_RE: OnceLock<Regex> = OnceLock::new();

fn banner_version_re() -> &'static Regex {
    BANNER_VERSION_RE.get_or_init(|| {
        Regex::new(r"jQuery\s+v?(\d[\d.]*)").expect("banner version regex is valid")
    })
}

fn file_version_re() -> &'static Regex {
    FILE_VERSION_RE
        .get_or_init(|| Regex::new(r"jquery-?(\d[\d.]*)").expect("file version regex is valid"))
}

/// Whether a file name belongs to the jQuery family
pub fn is_jquery_file(file_name: &str) -> bool {
    file_name.to_lowercase().contains("jquery")
}

/// Result of the sub-analyzer for one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JqueryAnalysis {
    /// Version string from the banner or a versioned name in the content
    pub version: Option<String>,
    /// Plugin families present in the file
    pub plugins: Vec<String>,
    pub findings: Vec<Finding>,
}

impl JqueryAnalysis {
    /// Whether any finding marks the file unused
    pub fn is_likely_unused(&self) -> bool {
        self.findings.iter().any(|f| f.unused)
    }
}

/// Detect the library version from the content
pub fn detect_version(content: &str) -> Option<String> {
    banner_version_re()
        .captures(content)
        .or_else(|| file_version_re().captures(content))
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim_end_matches('.').to_string())
}

/// Analyze one jQuery-family file
///
/// # Examples
///
/// ```
/// use deadweight::analyzer::jquery::analyze;
/// use deadweight::analyzer::js_rules::JsFileInput;
/// use deadweight::config::JsSettings;
///
/// let limits = JsSettings::default();
/// let content = "/*! jQuery UI - v1.13.2 */ $.widget('ui.draggable', {}); sortable";
/// let analysis = analyze(&JsFileInput {
///     url: "https://example.com/jquery-ui.min.js",
///     file_name: "jquery-ui.min.js",
///     content,
///     byte_size: content.len() as u64,
///     limits: &limits,
/// });
///
/// assert_eq!(analysis.plugins, vec!["jQuery UI"]);
/// assert!(!analysis.is_likely_unused());
/// ```
pub fn analyze(input: &JsFileInput<'_>) -> JqueryAnalysis {
    let content = input.content;
    let file_name = input.file_name.to_lowercase();
    let mut analysis = JqueryAnalysis {
        version: detect_version(content),
        ..JqueryAnalysis::default()
    };

    if let Some(version) = &analysis.version {
        if leading_version(version).is_some_and(|v| v < MIN_SUPPORTED_VERSION) {
            analysis.findings.push(Finding::note(format!(
                "Old jQuery version {} detected - consider updating",
                version
            )));
        }
    }

    for family in PLUGIN_FAMILIES {
        if !(file_name.contains(family.file_key) || content.contains(family.content_key)) {
            continue;
        }
        analysis.plugins.push(family.name.to_string());

        let found: Vec<&str> = family
            .markers
            .iter()
            .copied()
            .filter(|marker| content.contains(marker))
            .collect();

        if found.is_empty() {
            analysis.findings.push(Finding::unused(family.unused_reason));
        } else {
            analysis.findings.push(Finding::note(format!(
                "{}: {} usage marker(s) found: {}",
                family.name,
                found.len(),
                found.join(", ")
            )));
        }
    }

    let deprecated: Vec<&str> = DEPRECATED_METHODS
        .iter()
        .copied()
        .filter(|method| content.contains(method))
        .collect();
    if !deprecated.is_empty() {
        analysis.findings.push(Finding::note(format!(
            "Deprecated jQuery methods found: {}",
            deprecated.join(", ")
        )));
    }

    if CORE_FILE_NAMES.contains(&file_name.as_str())
        && input.byte_size < input.limits.min_jquery_core_bytes
    {
        analysis
            .findings
            .push(Finding::unused("jQuery file seems too small or corrupted"));
    }

    analysis
}
