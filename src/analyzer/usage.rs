//! Selector usage classification
//!
//! A selector group is used when it references no class at all, or when any
//! of its classes shows up either in the snapshot's applied-class set or in a
//! `class` attribute of the captured markup.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use super::selectors::{split_selector_list, SelectorGroup};

static CLASS_ATTR_RE: OnceLock<Regex> = OnceLock::new();

fn class_attr_re() -> &'static Regex {
    CLASS_ATTR_RE.get_or_init(|| {
        Regex::new(r#"(?i)(?:^|\s)class\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("class attribute regex is valid")
    })
}

/// Class tokens observed as applied in the snapshot
#[derive(Debug, Clone, Default)]
pub struct UsedClassSet {
    tokens: HashSet<String>,
}

impl UsedClassSet {
    /// Build from raw tokens; blank entries are dropped and the rest trimmed
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(|t| t.as_ref().trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// Whether a token was applied to any element
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when no class was applied anywhere
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Index of every token appearing inside a `class="..."` attribute value
///
/// Covers both the exact `class="token"` form and tokens inside
/// multi-class attribute strings.
#[derive(Debug, Clone, Default)]
pub struct MarkupClassIndex {
    tokens: HashSet<String>,
}

impl MarkupClassIndex {
    /// Scan markup for class attributes
    ///
    /// # Examples
    ///
    /// ```
    /// use deadweight::analyzer::usage::MarkupClassIndex;
    ///
    /// let index = MarkupClassIndex::from_markup(r#"<div class="card  card--wide"><p class='lead'>"#);
    /// assert!(index.contains("card--wide"));
    /// assert!(index.contains("lead"));
    /// assert!(!index.contains("card card--wide"));
    /// ```
    pub fn from_markup(markup: &str) -> Self {
        let tokens = class_attr_re()
            .captures_iter(markup)
            .filter_map(|cap| cap.get(1).or_else(|| cap.get(2)))
            .flat_map(|value| value.as_str().split_whitespace())
            .map(str::to_string)
            .collect();

        Self { tokens }
    }

    /// Whether the token occurs in any class attribute
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }
}

/// Everything needed to decide selector usage for one analysis run
#[derive(Debug, Clone, Default)]
pub struct UsageContext {
    used: UsedClassSet,
    markup: MarkupClassIndex,
}

impl UsageContext {
    /// Build the context from the applied-class set and raw markup
    pub fn new(used: UsedClassSet, markup: &str) -> Self {
        Self {
            used,
            markup: MarkupClassIndex::from_markup(markup),
        }
    }

    /// Whether a single class token counts as used
    pub fn is_class_used(&self, token: &str) -> bool {
        self.used.contains(token) || self.markup.contains(token)
    }

    /// Usage verdict for one selector group
    ///
    /// Groups without class tokens (element, id, attribute, pseudo-class
    /// selectors) are always used.
    ///
    /// # Examples
    ///
    /// ```
    /// use deadweight::analyzer::selectors::SelectorGroup;
    /// use deadweight::analyzer::usage::{UsageContext, UsedClassSet};
    ///
    /// let ctx = UsageContext::new(UsedClassSet::new(["a"]), r#"<i class="b c"></i>"#);
    ///
    /// let used = |s: &str| ctx.is_used(&SelectorGroup::parse(s).unwrap());
    /// assert!(used(".a"));
    /// assert!(used(".c:hover"));
    /// assert!(used("#main > p"));
    /// assert!(!used(".d"));
    /// ```
    pub fn is_used(&self, group: &SelectorGroup) -> bool {
        !group.has_classes()
            || group
                .class_tokens
                .iter()
                .any(|token| self.is_class_used(token))
    }

    /// Usage verdict for a whole rule's selector list
    ///
    /// A rule is kept when any of its comma-separated groups is used; an
    /// empty selector list is kept.
    pub fn is_rule_used(&self, selector_list: &str) -> bool {
        let groups: Vec<SelectorGroup> = split_selector_list(selector_list)
            .into_iter()
            .filter_map(SelectorGroup::parse)
            .collect();

        groups.is_empty() || groups.iter().any(|g| self.is_used(g))
    }
}
