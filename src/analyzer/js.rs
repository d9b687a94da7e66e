//! Script track: per-file classification
//!
//! Files are classified independently on the rayon pool and collected back
//! in input order.

use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;
use thiserror::Error;

use super::js_rules::{evaluate, JsFileInput, Verdict};
use crate::config::JsSettings;
use crate::snapshot::AssetFile;

/// Errors that abort the script track as a whole
#[derive(Error, Debug)]
pub enum JsStageError {
    #[error("failed to build classification worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

static FUNCTION_DECL_RE: OnceLock<Regex> = OnceLock::new();
static CONST_FN_RE: OnceLock<Regex> = OnceLock::new();

fn function_decl_re() -> &'static Regex {
    FUNCTION_DECL_RE.get_or_init(|| {
        Regex::new(r"function\s+([a-zA-Z_$][a-zA-Z0-9_$]*)\s*\(")
            .expect("function declaration regex is valid")
    })
}

fn const_fn_re() -> &'static Regex {
    CONST_FN_RE.get_or_init(|| {
        Regex::new(r"const\s+([a-zA-Z_$][a-zA-Z0-9_$]*)\s*=\s*\(")
            .expect("const function regex is valid")
    })
}

/// Classification and metadata for one script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsFileVerdict {
    pub url: String,
    pub file_name: String,
    pub size: u64,
    /// Path points at platform core code
    pub is_core: bool,
    pub is_plugin: bool,
    pub is_theme: bool,
    pub is_jquery: bool,
    pub likely_unused: bool,
    /// Every finding's reason in rule order; non-empty whenever `likely_unused`
    pub reasons: Vec<String>,
    /// Declared function names, deduplicated
    pub functions: Vec<String>,
    /// Libraries the content appears to rely on
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jquery_version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<String>,
}

/// Classify a single script
pub fn classify_file(file: &AssetFile, limits: &JsSettings) -> JsFileVerdict {
    let file_name = file.file_name();
    let input = JsFileInput {
        url: &file.url,
        file_name,
        content: &file.content,
        byte_size: file.byte_size(),
        limits,
    };

    let evaluation = evaluate(&input);
    let is_jquery = evaluation.jquery.is_some();
    let (jquery_version, plugins) = evaluation
        .jquery
        .map(|analysis| (analysis.version, analysis.plugins))
        .unwrap_or_default();
    let verdict = Verdict::fold(evaluation.findings);

    JsFileVerdict {
        url: file.url.clone(),
        file_name: file_name.to_string(),
        size: file.byte_size(),
        is_core: ["/core/", "wp-includes", "wp-admin"]
            .iter()
            .any(|signal| file.url.contains(signal)),
        is_plugin: file.url.contains("plugins"),
        is_theme: file.url.contains("themes"),
        is_jquery,
        likely_unused: verdict.likely_unused,
        reasons: verdict.reasons,
        functions: extract_functions(&file.content),
        dependencies: extract_dependencies(&file.content),
        jquery_version,
        plugins,
    }
}

/// Classify every script, preserving input order
///
/// With `limits.workers` set, classification runs on a dedicated pool of
/// that many threads instead of the global rayon pool.
pub fn classify_all(
    files: &[AssetFile],
    limits: &JsSettings,
) -> Result<Vec<JsFileVerdict>, JsStageError> {
    let run = || -> Vec<JsFileVerdict> {
        files
            .par_iter()
            .map(|file| classify_file(file, limits))
            .collect()
    };

    match limits.workers {
        Some(workers) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("deadweight-js-{}", i))
                .build()?;
            Ok(pool.install(run))
        }
        None => Ok(run()),
    }
}

/// Names from `function NAME(` and `const NAME = (` forms, first-seen order
///
/// # Examples
///
/// ```
/// use deadweight::analyzer::js::extract_functions;
///
/// let names = extract_functions("function init() {}\nconst debounce = (fn) => fn;\nfunction init () {}");
/// assert_eq!(names, vec!["init", "debounce"]);
/// ```
pub fn extract_functions(content: &str) -> Vec<String> {
    let declared = function_decl_re().captures_iter(content);
    let assigned = const_fn_re().captures_iter(content);

    let mut seen = HashSet::new();
    declared
        .chain(assigned)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Well-known libraries referenced by the content
pub fn extract_dependencies(content: &str) -> Vec<String> {
    let checks: [(&str, bool); 5] = [
        ("jQuery", content.contains("jQuery") || content.contains('$')),
        ("React", content.contains("React")),
        ("Vue", content.contains("Vue")),
        ("Angular", content.contains("Angular")),
        ("Bootstrap", content.contains("bootstrap")),
    ];

    checks
        .into_iter()
        .filter(|(_, present)| *present)
        .map(|(name, _)| name.to_string())
        .collect()
}
