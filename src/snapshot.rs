//! Captured page snapshots
//!
//! A snapshot is the frozen output of the external Snapshot Provider: the
//! rendered markup, the class tokens applied to elements, and the text of
//! every stylesheet and script the page loaded. Asset order is significant
//! and preserved everywhere downstream.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::analyzer::platform::PlatformSignals;
use crate::error::DeadweightError;
use crate::infra::{FileSystem, RealFileSystem};

/// Prefix used for synthetic names of inline `<style>`/`<script>` blocks
pub const INLINE_PREFIX: &str = "inline-";

/// A downloaded or inline CSS/JS resource
///
/// Empty content is a valid terminal state meaning the fetch failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFile {
    /// Source URL, or a synthetic `inline-N` token for inline blocks
    pub url: String,
    /// Asset text (empty when the fetch failed)
    #[serde(default)]
    pub content: String,
}

impl AssetFile {
    /// Create an asset from its URL and text
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
        }
    }

    /// Create an inline asset named `inline-{index}`
    pub fn inline(index: usize, content: impl Into<String>) -> Self {
        Self::new(format!("{}{}", INLINE_PREFIX, index), content)
    }

    /// Size of the asset in bytes (always the content length)
    pub fn byte_size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Final path segment of the URL, or the URL itself when that is empty
    ///
    /// # Examples
    ///
    /// ```
    /// use deadweight::snapshot::AssetFile;
    ///
    /// let asset = AssetFile::new("https://example.com/js/app.min.js", "");
    /// assert_eq!(asset.file_name(), "app.min.js");
    ///
    /// let inline = AssetFile::inline(0, "");
    /// assert_eq!(inline.file_name(), "inline-0");
    /// ```
    pub fn file_name(&self) -> &str {
        file_name_from_url(&self.url)
    }
}

/// Final `/`-separated segment of a URL, falling back to the whole URL
pub fn file_name_from_url(url: &str) -> &str {
    match url.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => url,
    }
}

/// Frozen capture of a rendered page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// URL of the captured page (informational)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
    /// Serialized rendered markup
    pub markup: String,
    /// Class tokens found on any element
    #[serde(default)]
    pub used_classes: Vec<String>,
    /// External stylesheets in document order
    #[serde(default)]
    pub css_assets: Vec<AssetFile>,
    /// Inline `<style>` blocks in document order
    #[serde(default)]
    pub inline_styles: Vec<String>,
    /// External scripts in document order
    #[serde(default)]
    pub js_assets: Vec<AssetFile>,
    /// Inline `<script>` blocks in document order
    #[serde(default)]
    pub inline_scripts: Vec<String>,
    /// Platform signals supplied by the provider, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformSignals>,
}

impl Snapshot {
    /// All CSS assets: external files first, then non-empty inline styles
    pub fn css_files(&self) -> Vec<AssetFile> {
        let inline = self
            .inline_styles
            .iter()
            .filter(|text| !text.is_empty())
            .enumerate()
            .map(|(i, text)| AssetFile::inline(i, text.as_str()));

        self.css_assets.iter().cloned().chain(inline).collect()
    }

    /// All JS assets: external files first, then inline scripts with non-blank text
    pub fn js_files(&self) -> Vec<AssetFile> {
        let inline = self
            .inline_scripts
            .iter()
            .filter(|text| !text.trim().is_empty())
            .enumerate()
            .map(|(i, text)| AssetFile::inline(i, text.as_str()));

        self.js_assets.iter().cloned().chain(inline).collect()
    }
}

/// Loads snapshots from JSON files
pub struct SnapshotLoader;

impl SnapshotLoader {
    /// Load a snapshot from a JSON file on disk
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use deadweight::snapshot::SnapshotLoader;
    /// use std::path::Path;
    ///
    /// let snapshot = SnapshotLoader::load(Path::new("snapshot.json"))?;
    /// println!("{} stylesheets", snapshot.css_files().len());
    /// # Ok::<(), deadweight::error::DeadweightError>(())
    /// ```
    pub fn load(path: &Path) -> Result<Snapshot, DeadweightError> {
        Self::load_with_fs(path, &RealFileSystem)
    }

    /// Load a snapshot with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(path: &Path, fs: &FS) -> Result<Snapshot, DeadweightError> {
        let contents = fs
            .read_to_string(path)
            .map_err(|source| DeadweightError::SnapshotNotFound {
                path: path.to_path_buf(),
                source,
            })?;

        Self::parse(&contents).map_err(|source| DeadweightError::InvalidSnapshot {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse snapshot JSON text
    pub fn parse(json: &str) -> Result<Snapshot, serde_json::Error> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        log::debug!(
            "Loaded snapshot: {} css assets, {} inline styles, {} js assets, {} inline scripts",
            snapshot.css_assets.len(),
            snapshot.inline_styles.len(),
            snapshot.js_assets.len(),
            snapshot.inline_scripts.len()
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    struct MockFileSystem {
        content: Option<String>,
    }

    impl FileSystem for MockFileSystem {
        fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
            unimplemented!()
        }

        fn read_to_string(&self, _path: &Path) -> io::Result<String> {
            self.content
                .clone()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file not found"))
        }

        fn write(&self, _path: &Path, _contents: impl AsRef<[u8]>) -> io::Result<()> {
            unimplemented!()
        }

        fn exists(&self, _path: &Path) -> bool {
            self.content.is_some()
        }
    }

    #[test]
    fn test_byte_size_matches_content_length() {
        let asset = AssetFile::new("a.js", "var x = 1;");
        assert_eq!(asset.byte_size(), 10);
        assert_eq!(AssetFile::new("b.js", "").byte_size(), 0);
    }

    #[test]
    fn test_file_name_falls_back_to_url() {
        assert_eq!(file_name_from_url("https://cdn.example.com/lib/jquery.js"), "jquery.js");
        assert_eq!(file_name_from_url("app.js"), "app.js");
        assert_eq!(file_name_from_url("https://example.com/"), "https://example.com/");
    }

    #[test]
    fn test_css_files_orders_external_before_inline() {
        let snapshot = Snapshot {
            markup: String::new(),
            css_assets: vec![AssetFile::new("site.css", ".a{}")],
            inline_styles: vec![".b{}".to_string(), String::new(), ".c{}".to_string()],
            ..Default::default()
        };

        let urls: Vec<_> = snapshot.css_files().into_iter().map(|f| f.url).collect();
        assert_eq!(urls, vec!["site.css", "inline-0", "inline-1"]);
    }

    #[test]
    fn test_js_files_skips_blank_inline_scripts() {
        let snapshot = Snapshot {
            markup: String::new(),
            js_assets: vec![AssetFile::new("app.js", "run()")],
            inline_scripts: vec!["   ".to_string(), "init()".to_string()],
            ..Default::default()
        };

        let files = snapshot.js_files();
        assert_eq!(files.len(), 2);
        assert_eq!(files[1].url, "inline-0");
        assert_eq!(files[1].content, "init()");
    }

    #[test]
    fn test_parse_defaults_missing_fields() {
        let snapshot = SnapshotLoader::parse(r#"{"markup": "<div></div>"}"#).unwrap();
        assert!(snapshot.used_classes.is_empty());
        assert!(snapshot.css_files().is_empty());
        assert!(snapshot.platform.is_none());
    }

    #[test]
    fn test_load_with_fs_missing_file_is_snapshot_not_found() {
        let fs = MockFileSystem { content: None };
        let err = SnapshotLoader::load_with_fs(&PathBuf::from("snap.json"), &fs).unwrap_err();
        assert!(matches!(err, DeadweightError::SnapshotNotFound { .. }));
    }

    #[test]
    fn test_load_with_fs_malformed_json_is_invalid_snapshot() {
        let fs = MockFileSystem {
            content: Some("{not json".to_string()),
        };
        let err = SnapshotLoader::load_with_fs(&PathBuf::from("snap.json"), &fs).unwrap_err();
        assert!(matches!(err, DeadweightError::InvalidSnapshot { .. }));
    }
}
