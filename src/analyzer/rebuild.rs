//! Filtered stylesheet reconstruction
//!
//! Walks the original stylesheet text and drops every rule whose selector
//! list is unused. Everything else (comments, blank lines, `@import`
//! statements, at-rule blocks) is copied through untouched, and the original
//! line layout is preserved. This is a textual rewrite: kept rules are never
//! edited or minified.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::selectors::normalize_css;
use super::usage::UsageContext;

/// At-rules whose body holds nested rules that are filtered individually
const GROUP_AT_RULES: &[&str] = &[
    "@media",
    "@supports",
    "@layer",
    "@container",
    "@document",
    "@-moz-document",
    "@scope",
];

/// Errors that can occur while rebuilding a stylesheet
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RebuildError {
    /// A `{` was never matched by a closing `}`
    #[error("block opened on line {line} is never closed")]
    UnterminatedBlock {
        /// 1-based line of the opening brace
        line: usize,
    },
}

/// Rebuilt stylesheet plus rule counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebuildOutput {
    /// Filtered stylesheet text
    pub css: String,
    /// Rules retained
    pub kept_rules: usize,
    /// Rules dropped as unused
    pub dropped_rules: usize,
}

/// Rebuild `css` keeping only rules the usage context considers used
///
/// # Examples
///
/// ```
/// use deadweight::analyzer::rebuild::rebuild_css;
/// use deadweight::analyzer::usage::{UsageContext, UsedClassSet};
///
/// let ctx = UsageContext::new(UsedClassSet::new(["a"]), "");
/// let css = "/* site */\n.a {\n  color: red;\n}\n.b {\n  color: blue;\n}\np { margin: 0 }\n";
///
/// let output = rebuild_css(css, &ctx).unwrap();
/// assert_eq!(output.css, "/* site */\n.a {\n  color: red;\n}\np { margin: 0 }\n");
/// assert_eq!(output.dropped_rules, 1);
/// ```
pub fn rebuild_css(css: &str, ctx: &UsageContext) -> Result<RebuildOutput, RebuildError> {
    let bytes = css.as_bytes();
    let mut out = String::with_capacity(css.len());
    let mut seg_start = 0;
    let mut i = 0;
    let mut kept_rules = 0;
    let mut dropped_rules = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_comment(bytes, i),
            b'"' | b'\'' => i = skip_string(bytes, i),
            b'{' => {
                let segment = &css[seg_start..i];
                let (trivia, prelude) = split_leading_trivia(segment);
                let selector = normalize_css(prelude);

                if is_group_at_rule(&selector) {
                    out.push_str(&css[seg_start..=i]);
                    i += 1;
                    seg_start = i;
                    continue;
                }

                let end = find_block_end(bytes, i).ok_or(RebuildError::UnterminatedBlock {
                    line: line_of(css, i),
                })?;

                if selector.starts_with('@') || ctx.is_rule_used(&selector) {
                    out.push_str(&css[seg_start..=end]);
                    if !selector.starts_with('@') {
                        kept_rules += 1;
                    }
                    i = end + 1;
                } else {
                    dropped_rules += 1;
                    out.push_str(strip_trailing_indent(trivia));
                    i = end + 1;
                    if out.is_empty() || out.ends_with('\n') {
                        if let Some(next) = blank_rest_of_line(bytes, i) {
                            i = next;
                        }
                    }
                }
                seg_start = i;
            }
            b'}' | b';' => {
                out.push_str(&css[seg_start..=i]);
                i += 1;
                seg_start = i;
            }
            _ => i += 1,
        }
    }
    out.push_str(&css[seg_start..]);

    Ok(RebuildOutput {
        css: out,
        kept_rules,
        dropped_rules,
    })
}

/// Minimal stylesheet with one placeholder rule per used class token
///
/// Used when the original text cannot be rebuilt, so the pipeline still ends
/// with some CSS output.
///
/// # Examples
///
/// ```
/// use deadweight::analyzer::rebuild::placeholder_stylesheet;
///
/// let css = placeholder_stylesheet(&["btn".to_string(), "card".to_string()]);
/// assert_eq!(css, ".btn{/* styles for btn */}\n.card{/* styles for card */}");
/// ```
pub fn placeholder_stylesheet(used_tokens: &[String]) -> String {
    used_tokens
        .iter()
        .map(|token| format!(".{}{{/* styles for {} */}}", token, token))
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_group_at_rule(selector: &str) -> bool {
    GROUP_AT_RULES.iter().any(|name| {
        selector
            .strip_prefix(name)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '(']))
    })
}

/// Index just past the comment starting at `start`, or the end of input
fn skip_comment(bytes: &[u8], start: usize) -> usize {
    let mut j = start + 2;
    while j + 1 < bytes.len() {
        if bytes[j] == b'*' && bytes[j + 1] == b'/' {
            return j + 2;
        }
        j += 1;
    }
    bytes.len()
}

/// Index just past the string literal starting at `start`
///
/// A quote with no closing partner on the same line is treated as a plain
/// character.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut j = start + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'\n' => return start + 1,
            b if b == quote => return j + 1,
            _ => j += 1,
        }
    }
    start + 1
}

/// Index of the `}` matching the `{` at `open`
fn find_block_end(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut j = open;
    while j < bytes.len() {
        match bytes[j] {
            b'/' if bytes.get(j + 1) == Some(&b'*') => {
                j = skip_comment(bytes, j);
                continue;
            }
            b'"' | b'\'' => {
                j = skip_string(bytes, j);
                continue;
            }
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(j);
                }
            }
            _ => {}
        }
        j += 1;
    }
    None
}

/// Split whitespace and comments off the front of a rule prelude
fn split_leading_trivia(segment: &str) -> (&str, &str) {
    let mut rest = segment;
    loop {
        let trimmed = rest.trim_start();
        match trimmed.strip_prefix("/*") {
            Some(after) => {
                rest = match after.find("*/") {
                    Some(end) => &after[end + 2..],
                    None => "",
                };
            }
            None => {
                rest = trimmed;
                break;
            }
        }
    }
    let split = segment.len() - rest.len();
    (&segment[..split], rest)
}

fn strip_trailing_indent(trivia: &str) -> &str {
    trivia.trim_end_matches([' ', '\t'])
}

/// If the rest of the current line is blank, the index just past its newline
fn blank_rest_of_line(bytes: &[u8], from: usize) -> Option<usize> {
    let mut j = from;
    while j < bytes.len() && matches!(bytes[j], b' ' | b'\t' | b'\r') {
        j += 1;
    }
    match bytes.get(j) {
        None => Some(j),
        Some(b'\n') => Some(j + 1),
        Some(_) => None,
    }
}

fn line_of(css: &str, index: usize) -> usize {
    css[..index].matches('\n').count() + 1
}
