//! WordPress detection from a captured snapshot
//!
//! Used when the snapshot provider did not send platform signals itself.
//! Evidence comes from the markup (generator meta tag, REST API link, body
//! classes) and from the URLs of loaded assets.

use regex::Regex;
use std::sync::OnceLock;

use super::platform::{PlatformSignals, PluginInfo, ThemeInfo};
use crate::snapshot::Snapshot;

const PLATFORM_PATHS: &[&str] = &["wp-includes", "wp-admin", "wp-content"];

static META_TAG_RE: OnceLock<Regex> = OnceLock::new();
static ATTR_RE: OnceLock<Regex> = OnceLock::new();
static GENERATOR_VERSION_RE: OnceLock<Regex> = OnceLock::new();
static REST_LINK_RE: OnceLock<Regex> = OnceLock::new();
static BODY_CLASS_RE: OnceLock<Regex> = OnceLock::new();
static THEME_PATH_RE: OnceLock<Regex> = OnceLock::new();
static PLUGIN_PATH_RE: OnceLock<Regex> = OnceLock::new();
static THEME_NAME_RE: OnceLock<Regex> = OnceLock::new();
static THEME_VERSION_RE: OnceLock<Regex> = OnceLock::new();

fn meta_tag_re() -> &'static Regex {
    META_TAG_RE.get_or_init(|| Regex::new(r"(?i)<meta\b[^>]*>").expect("meta tag regex is valid"))
}

fn attr_re() -> &'static Regex {
    ATTR_RE.get_or_init(|| {
        Regex::new(r#"(?i)([a-z-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("attribute regex is valid")
    })
}

fn generator_version_re() -> &'static Regex {
    GENERATOR_VERSION_RE.get_or_init(|| {
        Regex::new(r"WordPress\s+(\d[\d.]*)").expect("generator version regex is valid")
    })
}

fn rest_link_re() -> &'static Regex {
    REST_LINK_RE.get_or_init(|| {
        Regex::new(r#"(?i)<link\b[^>]*rel\s*=\s*["']https://api\.w\.org/["']"#)
            .expect("rest link regex is valid")
    })
}

fn body_class_re() -> &'static Regex {
    BODY_CLASS_RE.get_or_init(|| {
        Regex::new(r#"(?i)<body\b[^>]*\sclass\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("body class regex is valid")
    })
}

fn theme_path_re() -> &'static Regex {
    THEME_PATH_RE.get_or_init(|| {
        Regex::new(r"wp-content/themes/([^/?#]+)").expect("theme path regex is valid")
    })
}

fn plugin_path_re() -> &'static Regex {
    PLUGIN_PATH_RE.get_or_init(|| {
        Regex::new(r"wp-content/plugins/([^/?#]+)").expect("plugin path regex is valid")
    })
}

fn theme_name_re() -> &'static Regex {
    THEME_NAME_RE
        .get_or_init(|| Regex::new(r"Theme Name:\s*([^\r\n*]+)").expect("theme name regex is valid"))
}

fn theme_version_re() -> &'static Regex {
    THEME_VERSION_RE
        .get_or_init(|| Regex::new(r"Version:\s*(\d[\d.]*)").expect("theme version regex is valid"))
}

/// Derive platform signals from markup and asset URLs
///
/// # Examples
///
/// ```
/// use deadweight::analyzer::platform_detect::detect_platform;
/// use deadweight::snapshot::{AssetFile, Snapshot};
///
/// let snapshot = Snapshot {
///     markup: r#"<meta name="generator" content="WordPress 6.4.2">"#.to_string(),
///     js_assets: vec![AssetFile::new(
///         "https://s.com/wp-content/plugins/contact-form-7/index.js",
///         "",
///     )],
///     ..Snapshot::default()
/// };
///
/// let signals = detect_platform(&snapshot);
/// assert!(signals.is_platform);
/// assert_eq!(signals.version.as_deref(), Some("6.4.2"));
/// assert_eq!(signals.plugins[0].name, "contact-form-7");
/// ```
pub fn detect_platform(snapshot: &Snapshot) -> PlatformSignals {
    let mut signals = PlatformSignals::default();

    if let Some(generator) = generator_content(&snapshot.markup) {
        if generator.contains("WordPress") {
            signals.is_platform = true;
            signals.version = generator_version_re()
                .captures(&generator)
                .and_then(|cap| cap.get(1))
                .map(|m| m.as_str().trim_end_matches('.').to_string());
        }
    }

    let urls = snapshot
        .js_assets
        .iter()
        .chain(&snapshot.css_assets)
        .map(|asset| asset.url.as_str());

    for url in urls {
        if PLATFORM_PATHS.iter().any(|p| url.contains(p)) {
            signals.is_platform = true;
            signals.core_files.push(url.to_string());
        }

        if signals.theme.is_none() {
            if let Some(name) = capture(theme_path_re(), url) {
                signals.theme = Some(ThemeInfo {
                    name: name.to_string(),
                    version: None,
                    path: Some(url.to_string()),
                });
            }
        }

        if let Some(name) = capture(plugin_path_re(), url) {
            if !signals.plugins.iter().any(|p| p.name == name) {
                signals.plugins.push(PluginInfo {
                    name: name.to_string(),
                    version: None,
                    path: Some(url.to_string()),
                });
            }
        }
    }

    if rest_link_re().is_match(&snapshot.markup) || has_platform_body_class(&snapshot.markup) {
        signals.is_platform = true;
    }

    if signals.is_platform {
        if let Some(theme) = signals.theme.as_mut() {
            enrich_theme(theme, snapshot);
        }
    }

    signals
}

/// Fill theme name and version from its `style.css` header, when captured
fn enrich_theme(theme: &mut ThemeInfo, snapshot: &Snapshot) {
    let stylesheet_path = format!("wp-content/themes/{}/style.css", theme.name);
    let Some(stylesheet) = snapshot
        .css_assets
        .iter()
        .find(|asset| asset.url.contains(&stylesheet_path))
    else {
        return;
    };

    if let Some(version) = capture(theme_version_re(), &stylesheet.content) {
        theme.version = Some(version.trim_end_matches('.').to_string());
    }
    if let Some(name) = capture(theme_name_re(), &stylesheet.content) {
        let name = name.trim();
        if !name.is_empty() {
            theme.name = name.to_string();
        }
    }
}

fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text).and_then(|cap| cap.get(1)).map(|m| m.as_str())
}

/// `content` of the first `<meta name="generator">` tag
fn generator_content(markup: &str) -> Option<String> {
    meta_tag_re().find_iter(markup).find_map(|tag| {
        let mut name = None;
        let mut content = None;
        for cap in attr_re().captures_iter(tag.as_str()) {
            let value = cap.get(2).or_else(|| cap.get(3)).map(|m| m.as_str());
            match cap.get(1).map(|m| m.as_str().to_lowercase()).as_deref() {
                Some("name") => name = value,
                Some("content") => content = value,
                _ => {}
            }
        }
        match name {
            Some(n) if n.eq_ignore_ascii_case("generator") => content.map(str::to_string),
            _ => None,
        }
    })
}

fn has_platform_body_class(markup: &str) -> bool {
    body_class_re()
        .captures(markup)
        .and_then(|cap| cap.get(1).or_else(|| cap.get(2)))
        .is_some_and(|classes| {
            let classes = classes.as_str();
            classes.contains("wp-") || classes.contains("wordpress")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::AssetFile;

    fn snapshot_with(markup: &str, css: Vec<AssetFile>, js: Vec<AssetFile>) -> Snapshot {
        Snapshot {
            markup: markup.to_string(),
            css_assets: css,
            js_assets: js,
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_plain_site_is_not_platform() {
        let snapshot = snapshot_with(
            r#"<html><head><meta name="generator" content="Hugo 0.120"></head><body class="home"></body></html>"#,
            vec![AssetFile::new("https://s.com/site.css", "")],
            vec![AssetFile::new("https://s.com/app.js", "")],
        );
        assert_eq!(detect_platform(&snapshot), PlatformSignals::default());
    }

    #[test]
    fn test_generator_attribute_order_does_not_matter() {
        let snapshot = snapshot_with(
            r#"<meta content='WordPress 5.9.3' name='generator' />"#,
            vec![],
            vec![],
        );
        let signals = detect_platform(&snapshot);
        assert!(signals.is_platform);
        assert_eq!(signals.version.as_deref(), Some("5.9.3"));
    }

    #[test]
    fn test_core_files_in_asset_order_scripts_first() {
        let snapshot = snapshot_with(
            "",
            vec![AssetFile::new("https://s.com/wp-includes/css/dashicons.css", "")],
            vec![AssetFile::new("https://s.com/wp-includes/js/jquery/jquery.min.js", "")],
        );
        let signals = detect_platform(&snapshot);
        assert_eq!(
            signals.core_files,
            vec![
                "https://s.com/wp-includes/js/jquery/jquery.min.js",
                "https://s.com/wp-includes/css/dashicons.css",
            ]
        );
    }

    #[test]
    fn test_plugins_deduplicated_first_path_kept() {
        let snapshot = snapshot_with(
            "",
            vec![AssetFile::new("https://s.com/wp-content/plugins/revslider/public/rs6.css", "")],
            vec![
                AssetFile::new("https://s.com/wp-content/plugins/revslider/public/rbtools.min.js", ""),
                AssetFile::new("https://s.com/wp-content/plugins/akismet/form.js?ver=5", ""),
            ],
        );
        let signals = detect_platform(&snapshot);
        let names: Vec<_> = signals.plugins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["revslider", "akismet"]);
        assert_eq!(
            signals.plugins[0].path.as_deref(),
            Some("https://s.com/wp-content/plugins/revslider/public/rbtools.min.js")
        );
    }

    #[test]
    fn test_theme_enriched_from_style_header() {
        let header = "/*\nTheme Name: Twenty Twenty-Four\nVersion: 1.1\n*/\nbody{margin:0}";
        let snapshot = snapshot_with(
            "",
            vec![AssetFile::new(
                "https://s.com/wp-content/themes/twentytwentyfour/style.css?ver=1.1",
                header,
            )],
            vec![],
        );
        let theme = detect_platform(&snapshot).theme.unwrap();
        assert_eq!(theme.name, "Twenty Twenty-Four");
        assert_eq!(theme.version.as_deref(), Some("1.1"));
    }

    #[test]
    fn test_rest_link_and_body_class_signals() {
        let rest = snapshot_with(r#"<link rel="https://api.w.org/" href="https://s.com/wp-json/">"#, vec![], vec![]);
        assert!(detect_platform(&rest).is_platform);

        let body = snapshot_with(r#"<body id="top" class="home wp-custom-logo">"#, vec![], vec![]);
        assert!(detect_platform(&body).is_platform);

        let other = snapshot_with(r#"<body class="home page">"#, vec![], vec![]);
        assert!(!detect_platform(&other).is_platform);
    }
}
