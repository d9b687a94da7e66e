//! Script bundle aggregation
//!
//! Sums sizes over all classified scripts and over the retained ones, and
//! renders the optimized bundle preview.

use serde::{Deserialize, Serialize};

use super::js::JsFileVerdict;
use crate::fmt::format_bytes;
use crate::snapshot::AssetFile;

/// Bundle text when nothing survives classification
pub const EMPTY_BUNDLE: &str = "// No JavaScript files to optimize";

const BUNDLE_FOOTER: &str =
    "\n// Optimization complete\n// Consider minifying and compressing for production use";

/// Aggregated outcome of the script track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleReport {
    pub total_files: usize,
    pub used_files: usize,
    /// File names of likely-unused scripts, in input order
    pub unused_file_names: Vec<String>,
    pub original_bytes: u64,
    pub optimized_bytes: u64,
    /// Rounded share of bytes removed, 0 when there were no bytes
    pub savings_percent: u32,
    /// Preview bundle of the retained scripts
    pub optimized_js: String,
    /// Per-file verdicts in input order
    pub files: Vec<JsFileVerdict>,
}

/// `round(100 * (original - optimized) / original)`, or 0 for an empty input
///
/// # Examples
///
/// ```
/// use deadweight::analyzer::bundle::savings_percent;
///
/// assert_eq!(savings_percent(0, 0), 0);
/// assert_eq!(savings_percent(300, 100), 67);
/// assert_eq!(savings_percent(10, 0), 100);
/// ```
pub fn savings_percent(original: u64, optimized: u64) -> u32 {
    if original == 0 {
        return 0;
    }
    let removed = original.saturating_sub(optimized) as f64;
    (removed * 100.0 / original as f64).round() as u32
}

/// Combine per-file verdicts with the files they describe
///
/// `verdicts` and `files` are parallel slices in the same order.
pub fn aggregate(verdicts: Vec<JsFileVerdict>, files: &[AssetFile], preview_chars: usize) -> BundleReport {
    let original_bytes: u64 = files.iter().map(AssetFile::byte_size).sum();

    let retained: Vec<&AssetFile> = files
        .iter()
        .zip(&verdicts)
        .filter(|(_, verdict)| !verdict.likely_unused)
        .map(|(file, _)| file)
        .collect();
    let optimized_bytes: u64 = retained.iter().map(|f| f.byte_size()).sum();

    let unused_file_names = verdicts
        .iter()
        .filter(|v| v.likely_unused)
        .map(|v| v.file_name.clone())
        .collect();

    BundleReport {
        total_files: files.len(),
        used_files: retained.len(),
        unused_file_names,
        original_bytes,
        optimized_bytes,
        savings_percent: savings_percent(original_bytes, optimized_bytes),
        optimized_js: render_bundle(&retained, files.len(), original_bytes, preview_chars),
        files: verdicts,
    }
}

/// Render the preview bundle for the retained scripts
pub fn render_bundle(
    retained: &[&AssetFile],
    total_files: usize,
    original_bytes: u64,
    preview_chars: usize,
) -> String {
    if retained.is_empty() {
        return EMPTY_BUNDLE.to_string();
    }

    let optimized_bytes: u64 = retained.iter().map(|f| f.byte_size()).sum();
    let mut out = format!(
        "// Optimized JavaScript Bundle\n\
         // Generated by deadweight\n\
         // Retained files: {} of {}\n\
         // Original size: {}\n\
         // Optimized size: {}\n\n",
        retained.len(),
        total_files,
        format_bytes(original_bytes),
        format_bytes(optimized_bytes)
    );

    for file in retained {
        let name = file.file_name();
        if file.content.trim().is_empty() {
            out.push_str(&format!("// === {} === (empty file)\n\n", name));
            continue;
        }

        let preview: String = file.content.chars().take(preview_chars).collect();
        let truncated = file.content.chars().nth(preview_chars).is_some();
        out.push_str(&format!("// === {} ===\n{}", name, preview));
        if truncated {
            out.push_str("...\n// (truncated for display)");
        }
        out.push_str("\n\n");
    }

    out.push_str(BUNDLE_FOOTER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::js::classify_all;
    use crate::config::JsSettings;

    fn report(files: &[AssetFile]) -> BundleReport {
        let settings = JsSettings::default();
        let verdicts = classify_all(files, &settings).unwrap();
        aggregate(verdicts, files, settings.preview_chars)
    }

    #[test]
    fn test_single_empty_file_saves_everything() {
        let files = vec![AssetFile::new("https://example.com/js/dead.js", "")];
        let report = report(&files);

        assert_eq!(report.unused_file_names, vec!["dead.js"]);
        assert_eq!(report.used_files, 0);
        assert_eq!(report.optimized_js, EMPTY_BUNDLE);
        // an empty file has no bytes, so the ratio is defined as zero
        assert_eq!(report.savings_percent, 0);
    }

    #[test]
    fn test_savings_percent_counts_bytes() {
        let files = vec![
            AssetFile::new("keep.js", "go();"),
            AssetFile::new("drop.js", "el.attachEvent('x', f); ////////"),
        ];
        let report = report(&files);

        assert_eq!(report.original_bytes, 5 + 32);
        assert_eq!(report.optimized_bytes, 5);
        assert_eq!(report.savings_percent, 86);
        assert_eq!(report.unused_file_names, vec!["drop.js"]);
    }

    #[test]
    fn test_optimized_never_exceeds_original() {
        let files = vec![
            AssetFile::new("a.js", "a()"),
            AssetFile::new("b.js", ""),
            AssetFile::new("c.js", "$.browser"),
        ];
        let report = report(&files);
        assert!(report.optimized_bytes <= report.original_bytes);
        assert_eq!(report.total_files, 3);
        assert_eq!(report.used_files, 1);
    }

    #[test]
    fn test_render_bundle_sections_and_truncation() {
        let long = "x".repeat(12);
        let a = AssetFile::new("https://s.com/a.js", "short();");
        let b = AssetFile::new("https://s.com/b.js", long.as_str());
        let blank = AssetFile::new("https://s.com/blank.js", "   ");

        let bundle = render_bundle(&[&a, &b, &blank], 4, 100, 10);

        assert!(bundle.starts_with("// Optimized JavaScript Bundle\n"));
        assert!(bundle.contains("// Retained files: 3 of 4\n"));
        assert!(bundle.contains("// Original size: 100 B\n"));
        assert!(bundle.contains("// === a.js ===\nshort();\n\n"));
        assert!(bundle.contains("// === b.js ===\nxxxxxxxxxx...\n// (truncated for display)\n\n"));
        assert!(bundle.contains("// === blank.js === (empty file)\n\n"));
        assert!(bundle.ends_with("// Consider minifying and compressing for production use"));
    }

    #[test]
    fn test_render_bundle_preview_exactly_at_limit_is_not_truncated() {
        let file = AssetFile::new("a.js", "0123456789");
        let bundle = render_bundle(&[&file], 1, 10, 10);
        assert!(bundle.contains("0123456789\n\n"));
        assert!(!bundle.contains("truncated"));
    }
}
