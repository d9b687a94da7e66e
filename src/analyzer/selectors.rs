//! Selector extraction from raw stylesheet text
//!
//! Pattern-based, not a CSS parser: comments are stripped, whitespace is
//! collapsed, and every `selector-list { declarations }` pair whose body
//! holds no braces is treated as one rule. At-rule preludes are skipped, so
//! rules nested in `@media` blocks are still picked up on their own.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

/// Default cap on rule matches per extraction call
pub const DEFAULT_MAX_RULES: usize = 1000;

static COMMENT_RE: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();
static RULE_RE: OnceLock<Regex> = OnceLock::new();
static CLASS_RE: OnceLock<Regex> = OnceLock::new();

fn comment_re() -> &'static Regex {
    // SAFETY: constant pattern, validated by tests
    COMMENT_RE.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").expect("comment regex is valid"))
}

fn whitespace_re() -> &'static Regex {
    WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex is valid"))
}

fn rule_re() -> &'static Regex {
    RULE_RE.get_or_init(|| Regex::new(r"([^{}]+)\{[^{}]*\}").expect("rule regex is valid"))
}

fn class_re() -> &'static Regex {
    CLASS_RE.get_or_init(|| {
        Regex::new(r"\.([a-zA-Z_-][a-zA-Z0-9_-]*)").expect("class token regex is valid")
    })
}

/// One selector from a rule's selector list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectorGroup {
    /// Trimmed selector text, never empty
    pub raw_text: String,
    /// Class tokens referenced through `.name`, deduplicated in order
    pub class_tokens: Vec<String>,
}

impl SelectorGroup {
    /// Build a group from selector text, returning `None` for blank input
    ///
    /// # Examples
    ///
    /// ```
    /// use deadweight::analyzer::selectors::SelectorGroup;
    ///
    /// let group = SelectorGroup::parse(" nav .menu > .item:hover ").unwrap();
    /// assert_eq!(group.raw_text, "nav .menu > .item:hover");
    /// assert_eq!(group.class_tokens, vec!["menu", "item"]);
    ///
    /// assert!(SelectorGroup::parse("   ").is_none());
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let raw_text = text.trim();
        if raw_text.is_empty() {
            return None;
        }

        Some(Self {
            raw_text: raw_text.to_string(),
            class_tokens: class_tokens(raw_text),
        })
    }

    /// Whether the group references any class at all
    pub fn has_classes(&self) -> bool {
        !self.class_tokens.is_empty()
    }
}

/// Result of extracting selectors from one or more stylesheets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSelectors {
    /// Distinct selector groups in first-seen order
    pub groups: Vec<SelectorGroup>,
    /// Distinct bare class names in first-seen order
    pub class_names: Vec<String>,
}

impl ExtractedSelectors {
    /// Number of distinct selector groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when no rule was found
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn merge(&mut self, other: ExtractedSelectors) {
        let mut seen_groups: HashSet<String> =
            self.groups.iter().map(|g| g.raw_text.clone()).collect();
        let mut seen_classes: HashSet<String> = self.class_names.iter().cloned().collect();

        for group in other.groups {
            if seen_groups.insert(group.raw_text.clone()) {
                self.groups.push(group);
            }
        }
        for class in other.class_names {
            if seen_classes.insert(class.clone()) {
                self.class_names.push(class);
            }
        }
    }
}

/// Extract class tokens (without the leading dot) from selector text
pub fn class_tokens(selector: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    class_re()
        .captures_iter(selector)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

/// Split a selector list on commas that are not nested in `()` or `[]`
///
/// # Examples
///
/// ```
/// use deadweight::analyzer::selectors::split_selector_list;
///
/// let parts = split_selector_list(".a, :is(.b, .c), [data-x=\"1,2\"]");
/// assert_eq!(parts, vec![".a", ":is(.b, .c)", "[data-x=\"1,2\"]"]);
/// ```
pub fn split_selector_list(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: usize = 0;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, ch) in list.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(ch),
            (None, '(') | (None, '[') => depth += 1,
            (None, ')') | (None, ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(list[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(list[start..].trim());

    parts.into_iter().filter(|p| !p.is_empty()).collect()
}

/// Strip block comments and collapse whitespace runs to single spaces
pub fn normalize_css(css: &str) -> String {
    let without_comments = comment_re().replace_all(css, "");
    whitespace_re()
        .replace_all(&without_comments, " ")
        .trim()
        .to_string()
}

/// Extract selector groups from one stylesheet
///
/// At most `max_rules` rule matches are examined; the rest are ignored.
/// Malformed or empty input yields an empty result.
///
/// # Examples
///
/// ```
/// use deadweight::analyzer::selectors::{extract_selectors, DEFAULT_MAX_RULES};
///
/// let css = "/* theme */ .btn, .btn-primary { color: red } @media print { .nav { display: none } }";
/// let extracted = extract_selectors(css, DEFAULT_MAX_RULES);
///
/// let texts: Vec<_> = extracted.groups.iter().map(|g| g.raw_text.as_str()).collect();
/// assert_eq!(texts, vec![".btn", ".btn-primary", ".nav"]);
/// assert_eq!(extracted.class_names, vec!["btn", "btn-primary", "nav"]);
/// ```
pub fn extract_selectors(css: &str, max_rules: usize) -> ExtractedSelectors {
    let clean = normalize_css(css);
    if clean.is_empty() {
        return ExtractedSelectors::default();
    }

    let mut result = ExtractedSelectors::default();
    let mut seen_groups = HashSet::new();
    let mut seen_classes = HashSet::new();

    for cap in rule_re().captures_iter(&clean).take(max_rules) {
        // The capture runs back to the previous brace, so it can start with
        // `;`-terminated statements such as @charset or @import
        let Some(list) = cap
            .get(1)
            .and_then(|m| m.as_str().rsplit(';').next())
            .map(str::trim)
        else {
            continue;
        };
        // An at-rule prelude directly followed by a flat body (@font-face,
        // @page) is not a selector list
        if list.is_empty() || list.starts_with('@') {
            continue;
        }

        for part in split_selector_list(list) {
            let Some(group) = SelectorGroup::parse(part) else {
                continue;
            };
            for token in &group.class_tokens {
                if seen_classes.insert(token.clone()) {
                    result.class_names.push(token.clone());
                }
            }
            if seen_groups.insert(group.raw_text.clone()) {
                result.groups.push(group);
            }
        }
    }

    result
}

/// Extract and merge selectors from several stylesheets in order
///
/// The rule cap applies to each stylesheet separately.
pub fn extract_all<'a, I>(stylesheets: I, max_rules: usize) -> ExtractedSelectors
where
    I: IntoIterator<Item = &'a str>,
{
    stylesheets
        .into_iter()
        .fold(ExtractedSelectors::default(), |mut acc, css| {
            acc.merge(extract_selectors(css, max_rules));
            acc
        })
}
