//! Per-file script heuristics
//!
//! Each rule is a pure function over one script and returns at most one
//! finding. Findings are folded into a [`Verdict`] in rule order; a finding
//! can only ever add reasons or set the unused flag, never clear it.

use serde::{Deserialize, Serialize};

use super::jquery::{self, JqueryAnalysis};
use crate::config::JsSettings;

/// One observation about a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Whether this observation marks the file as likely unused
    pub unused: bool,
    /// Human-readable explanation
    pub reason: String,
}

impl Finding {
    /// Finding that flags the file as likely unused
    pub fn unused(reason: impl Into<String>) -> Self {
        Self {
            unused: true,
            reason: reason.into(),
        }
    }

    /// Informational finding that leaves the verdict unchanged
    pub fn note(reason: impl Into<String>) -> Self {
        Self {
            unused: false,
            reason: reason.into(),
        }
    }
}

/// Everything a rule may look at for one script
#[derive(Debug, Clone, Copy)]
pub struct JsFileInput<'a> {
    pub url: &'a str,
    pub file_name: &'a str,
    pub content: &'a str,
    pub byte_size: u64,
    pub limits: &'a JsSettings,
}

/// A single-finding rule
pub type Rule = fn(&JsFileInput<'_>) -> Option<Finding>;

/// Single-finding rules in evaluation order
pub const RULES: &[Rule] = &[
    empty_file,
    deprecated_browser_detection,
    legacy_ie_code,
    large_minified_file,
];

/// Content is empty (also the state of a failed fetch)
pub fn empty_file(input: &JsFileInput<'_>) -> Option<Finding> {
    input
        .content
        .is_empty()
        .then(|| Finding::unused("Empty file"))
}

/// Relies on browser sniffing removed from jQuery long ago
pub fn deprecated_browser_detection(input: &JsFileInput<'_>) -> Option<Finding> {
    (input.content.contains("jQuery.browser") || input.content.contains("$.browser"))
        .then(|| Finding::unused("Uses deprecated jQuery.browser"))
}

/// Carries conditional comments or `attachEvent` calls
pub fn legacy_ie_code(input: &JsFileInput<'_>) -> Option<Finding> {
    (input.content.contains("<!--[if IE") || input.content.contains("attachEvent"))
        .then(|| Finding::unused("Contains old IE-specific code"))
}

/// Big file packed onto few lines
pub fn large_minified_file(input: &JsFileInput<'_>) -> Option<Finding> {
    let lines = input.content.split('\n').count();
    (input.byte_size > input.limits.large_file_bytes && lines < input.limits.large_file_max_lines)
        .then(|| Finding::unused("Large minified file with questionable usage"))
}

/// Run every rule, then the jQuery sub-analyzer when the file name matches
///
/// # Examples
///
/// ```
/// use deadweight::analyzer::js_rules::{evaluate, JsFileInput, Verdict};
/// use deadweight::config::JsSettings;
///
/// let limits = JsSettings::default();
/// let input = JsFileInput {
///     url: "https://example.com/legacy.js",
///     file_name: "legacy.js",
///     content: "el.attachEvent('onclick', go);",
///     byte_size: 30,
///     limits: &limits,
/// };
///
/// let evaluation = evaluate(&input);
/// assert!(evaluation.jquery.is_none());
///
/// let verdict = Verdict::fold(evaluation.findings);
/// assert!(verdict.likely_unused);
/// assert_eq!(verdict.reasons, vec!["Contains old IE-specific code"]);
/// ```
pub fn evaluate(input: &JsFileInput<'_>) -> Evaluation {
    let mut findings: Vec<Finding> = RULES.iter().filter_map(|rule| rule(input)).collect();

    let jquery = jquery::is_jquery_file(input.file_name).then(|| {
        let mut analysis = jquery::analyze(input);
        findings.append(&mut analysis.findings);
        analysis
    });

    Evaluation { findings, jquery }
}

/// Findings for one file plus the jQuery details, when the sub-analyzer ran
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// Rule findings followed by the sub-analyzer's findings
    pub findings: Vec<Finding>,
    /// Version and plugins; its findings are already moved into `findings`
    pub jquery: Option<JqueryAnalysis>,
}

/// Folded outcome of all findings for one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub likely_unused: bool,
    pub reasons: Vec<String>,
}

impl Verdict {
    /// Fold findings in order: OR the unused flags, keep every reason
    pub fn fold(findings: impl IntoIterator<Item = Finding>) -> Self {
        findings
            .into_iter()
            .fold(Self::default(), |mut verdict, finding| {
                verdict.likely_unused |= finding.unused;
                verdict.reasons.push(finding.reason);
                verdict
            })
    }
}
