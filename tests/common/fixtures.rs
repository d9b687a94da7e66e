//! Snapshot fixtures
//!
//! Builds snapshots in memory and writes them as JSON into temporary
//! directories the CLI can be pointed at.

#![allow(dead_code)]

use deadweight::snapshot::{AssetFile, Snapshot};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Two rules, one used; one clean script and one legacy IE script
pub fn basic_snapshot() -> Snapshot {
    Snapshot {
        page_url: Some("https://example.com/".to_string()),
        markup: r#"<html><body><div class="a"></div></body></html>"#.to_string(),
        used_classes: vec!["a".to_string()],
        css_assets: vec![AssetFile::new(
            "https://example.com/site.css",
            ".a{color:red}.b{color:blue}",
        )],
        js_assets: vec![
            AssetFile::new("https://example.com/app.js", "function init() {}\ninit();"),
            AssetFile::new(
                "https://example.com/legacy.js",
                "window.attachEvent('onload', init);",
            ),
        ],
        ..Snapshot::default()
    }
}

/// A WordPress page with an outdated core and a few plugins
pub fn wordpress_snapshot() -> Snapshot {
    Snapshot {
        page_url: Some("https://blog.example.com/".to_string()),
        markup: concat!(
            r#"<html><head><meta name="generator" content="WordPress 5.8.2">"#,
            r#"<link rel="https://api.w.org/" href="https://blog.example.com/wp-json/"></head>"#,
            r#"<body class="home wp-custom-logo"><nav class="menu"></nav></body></html>"#,
        )
        .to_string(),
        used_classes: vec!["home".to_string(), "menu".to_string()],
        css_assets: vec![AssetFile::new(
            "https://blog.example.com/wp-content/themes/twentytwenty/style.css",
            "/*\nTheme Name: Twenty Twenty\nVersion: 1.9\n*/\n.menu{display:flex}.sidebar{float:left}",
        )],
        js_assets: vec![
            AssetFile::new(
                "https://blog.example.com/wp-includes/js/jquery/jquery.min.js",
                "/*! jQuery v1.12.4 */ jQuery.fn.extend({});",
            ),
            AssetFile::new(
                "https://blog.example.com/wp-content/plugins/contact-form-7/scripts.js",
                "wpcf7.init();",
            ),
        ],
        ..Snapshot::default()
    }
}

/// Write `snapshot` as `snapshot.json` into a fresh temporary directory
///
/// # Returns
///
/// A tuple of (TempDir, PathBuf to the JSON file) - the TempDir must be kept alive
pub fn write_snapshot(snapshot: &Snapshot) -> anyhow::Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("snapshot.json");
    fs::write(&path, serde_json::to_string_pretty(snapshot)?)?;
    Ok((temp_dir, path))
}

/// Write raw text as `snapshot.json` into a fresh temporary directory
pub fn write_raw_snapshot(contents: &str) -> anyhow::Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("snapshot.json");
    fs::write(&path, contents)?;
    Ok((temp_dir, path))
}
