//! Stylesheet track: extraction, usage counting and rebuilding
//!
//! Every CSS asset is extracted file by file, each distinct selector group is
//! classified once, and the concatenated text is rebuilt without unused
//! rules. A rebuild that cannot finish degrades to a placeholder stylesheet
//! instead of failing the track.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use super::rebuild::{placeholder_stylesheet, rebuild_css};
use super::selectors::extract_all;
use super::usage::UsageContext;
use crate::config::CssSettings;
use crate::snapshot::AssetFile;

/// Errors that abort the stylesheet track as a whole
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CssStageError {
    #[error("stylesheet input is {size} bytes, above the {limit} byte limit")]
    InputTooLarge { size: u64, limit: u64 },
}

/// Name and size of one analyzed stylesheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssFileInfo {
    pub url: String,
    pub size: u64,
}

/// Outcome of the stylesheet track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CssSummary {
    /// Distinct selector groups found
    pub total_selectors: usize,
    /// Groups classified as used
    pub used_selectors: usize,
    /// Raw text of every unused group, in first-seen order
    pub unused_selectors: Vec<String>,
    /// Class tokens referenced only by unused groups
    pub unused_classes: Vec<String>,
    /// Distinct class names referenced by any group
    pub total_class_names: usize,
    /// Stylesheet with unused rules removed
    pub optimized_css: String,
    /// Size of the concatenated input
    pub original_bytes: u64,
    /// Size of `optimized_css`
    pub optimized_bytes: u64,
    /// Set when the rebuild failed and the placeholder stylesheet was used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebuild_error: Option<String>,
    /// Analyzed stylesheets in order
    pub files: Vec<CssFileInfo>,
}

impl CssSummary {
    /// Share of selector groups that are unused, in percent (0 when none exist)
    pub fn savings_percent(&self) -> f64 {
        if self.total_selectors == 0 {
            return 0.0;
        }
        (self.total_selectors - self.used_selectors) as f64 / self.total_selectors as f64 * 100.0
    }
}

/// Run the stylesheet track over `files`
///
/// `used_tokens` is the ordered applied-class list, only consulted for the
/// placeholder stylesheet.
///
/// # Examples
///
/// ```
/// use deadweight::analyzer::css::analyze_css;
/// use deadweight::analyzer::usage::{UsageContext, UsedClassSet};
/// use deadweight::config::CssSettings;
/// use deadweight::snapshot::AssetFile;
///
/// let files = vec![AssetFile::new("site.css", ".a{color:red}.b{color:blue}")];
/// let ctx = UsageContext::new(UsedClassSet::new(["a"]), r#"<div class="a"></div>"#);
///
/// let summary = analyze_css(&files, &ctx, &["a".to_string()], &CssSettings::default()).unwrap();
/// assert_eq!(summary.total_selectors, 2);
/// assert_eq!(summary.used_selectors, 1);
/// assert_eq!(summary.unused_classes, vec!["b"]);
/// assert!(summary.optimized_css.contains(".a{color:red}"));
/// assert!(!summary.optimized_css.contains(".b"));
/// ```
pub fn analyze_css(
    files: &[AssetFile],
    ctx: &UsageContext,
    used_tokens: &[String],
    settings: &CssSettings,
) -> Result<CssSummary, CssStageError> {
    let original_bytes: u64 = files.iter().map(|f| f.byte_size() + 1).sum();
    if original_bytes > settings.max_input_bytes {
        return Err(CssStageError::InputTooLarge {
            size: original_bytes,
            limit: settings.max_input_bytes,
        });
    }

    let extracted = extract_all(files.iter().map(|f| f.content.as_str()), settings.max_rules);

    let mut used_selectors = 0;
    let mut unused_selectors = Vec::new();
    let mut used_classes = HashSet::new();
    let mut unused_groups = Vec::new();

    for group in &extracted.groups {
        if ctx.is_used(group) {
            used_selectors += 1;
            used_classes.extend(group.class_tokens.iter().map(String::as_str));
        } else {
            unused_selectors.push(group.raw_text.clone());
            unused_groups.push(group);
        }
    }

    let mut seen = HashSet::new();
    let unused_classes = unused_groups
        .iter()
        .flat_map(|g| g.class_tokens.iter())
        .filter(|token| !used_classes.contains(token.as_str()))
        .filter(|token| seen.insert(token.as_str()))
        .cloned()
        .collect();

    let combined: String = files.iter().map(|f| format!("{}\n", f.content)).collect();

    let (optimized_css, rebuild_error) = match rebuild_css(&combined, ctx) {
        Ok(output) => (output.css, None),
        Err(err) => (
            placeholder_stylesheet(&ordered_unique(used_tokens)),
            Some(err.to_string()),
        ),
    };

    Ok(CssSummary {
        total_selectors: extracted.len(),
        used_selectors,
        unused_selectors,
        unused_classes,
        total_class_names: extracted.class_names.len(),
        optimized_bytes: optimized_css.len() as u64,
        optimized_css,
        original_bytes,
        rebuild_error,
        files: files
            .iter()
            .map(|f| CssFileInfo {
                url: f.url.clone(),
                size: f.byte_size(),
            })
            .collect(),
    })
}

/// Trimmed, non-blank tokens with duplicates removed, first occurrence kept
pub fn ordered_unique(tokens: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty() && seen.insert(*t))
        .map(str::to_string)
        .collect()
}
