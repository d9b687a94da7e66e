//! Analysis report formatting

use console::style;
use std::fmt::{self, Write as _};

use crate::engine::AnalysisResult;
use crate::fmt::{format_bytes, truncate_str, CHART, MICROSCOPE, WARNING};

/// Unused selectors, classes and files listed before eliding the rest
const MAX_LISTED: usize = 15;

/// Width at which long selectors are cut
const MAX_SELECTOR_CHARS: usize = 60;

/// Format analysis results for console output
pub fn format_console_report(result: &AnalysisResult) -> Result<String, fmt::Error> {
    let mut output = String::new();

    if let Some(url) = &result.page_url {
        writeln!(output, "\n{} Analysis of {}", MICROSCOPE, style(url).bold())?;
    }

    if result.degraded {
        let stages: Vec<String> = result.degraded_stages.iter().map(|s| s.to_string()).collect();
        writeln!(
            output,
            "\n{} {} synthetic results substituted for failed stages: {}",
            WARNING,
            style("DEGRADED:").yellow().bold(),
            stages.join(", ")
        )?;
    }

    write_css_section(&mut output, result)?;
    write_js_section(&mut output, result)?;

    writeln!(output, "\n{} Performance Estimate", style("⚡").bold())?;
    writeln!(
        output,
        "   Load time: {}",
        style(&result.performance.estimated_load_time).green()
    )?;
    writeln!(output, "   {}", style(&result.performance.core_web_vitals).dim())?;

    if let Some(platform) = &result.platform {
        writeln!(output, "\n{} WordPress", style("🧩").bold())?;
        if let Some(version) = &platform.signals.version {
            writeln!(output, "   Version: {}", style(version).cyan())?;
        }
        if let Some(theme) = &platform.signals.theme {
            writeln!(
                output,
                "   Theme: {}{}",
                style(&theme.name).cyan(),
                theme
                    .version
                    .as_ref()
                    .map(|v| format!(" {}", v))
                    .unwrap_or_default()
            )?;
        }
        writeln!(output, "   Plugins: {}", platform.signals.plugins.len())?;

        for issue in &platform.issues {
            writeln!(output, "   {} {}", style("✗").red(), issue)?;
        }
        for rec in &platform.recommendations {
            writeln!(output, "   {} {}", style("→").cyan(), rec)?;
        }
    }

    output.push('\n');
    Ok(output)
}

fn write_css_section(output: &mut String, result: &AnalysisResult) -> fmt::Result {
    let css = &result.css;

    writeln!(output, "\n{} Stylesheets", CHART)?;
    writeln!(
        output,
        "   Selectors: {} used of {} ({:.1}% unused)",
        style(css.used_selectors).green(),
        style(css.total_selectors).cyan(),
        css.savings_percent()
    )?;
    writeln!(
        output,
        "   Size: {} → {}",
        style(format_bytes(css.original_bytes)).cyan(),
        style(format_bytes(css.optimized_bytes)).green()
    )?;

    if let Some(err) = &css.rebuild_error {
        writeln!(
            output,
            "   {} Rebuild failed ({}); placeholder stylesheet emitted",
            WARNING,
            style(err).yellow()
        )?;
    }

    if !css.unused_selectors.is_empty() {
        writeln!(output, "   Unused selectors:")?;
        for selector in css.unused_selectors.iter().take(MAX_LISTED) {
            writeln!(
                output,
                "      {}",
                style(truncate_str(selector, MAX_SELECTOR_CHARS)).dim()
            )?;
        }
        write_elided(output, css.unused_selectors.len())?;
    }

    Ok(())
}

fn write_js_section(output: &mut String, result: &AnalysisResult) -> fmt::Result {
    let js = &result.javascript;

    writeln!(output, "\n{} Scripts", CHART)?;
    writeln!(
        output,
        "   Files: {} used of {}",
        style(js.used_files).green(),
        style(js.total_files).cyan()
    )?;
    writeln!(
        output,
        "   Bundle: {} → {} ({}% saved)",
        style(format_bytes(js.original_bytes)).cyan(),
        style(format_bytes(js.optimized_bytes)).green(),
        style(js.savings_percent).green().bold()
    )?;

    let flagged: Vec<_> = js.files.iter().filter(|f| f.likely_unused).collect();
    if !flagged.is_empty() {
        writeln!(output, "   Likely unused:")?;
        for file in flagged.iter().take(MAX_LISTED) {
            writeln!(
                output,
                "      {} {}",
                style(&file.file_name).red(),
                style(format!("({})", file.reasons.join("; "))).dim()
            )?;
        }
        write_elided(output, flagged.len())?;
    } else if !js.unused_file_names.is_empty() {
        writeln!(output, "   Likely unused:")?;
        for name in js.unused_file_names.iter().take(MAX_LISTED) {
            writeln!(output, "      {}", style(name).red())?;
        }
        write_elided(output, js.unused_file_names.len())?;
    }

    Ok(())
}

fn write_elided(output: &mut String, total: usize) -> fmt::Result {
    if total > MAX_LISTED {
        writeln!(output, "      {}", style(format!("... and {} more", total - MAX_LISTED)).dim())?;
    }
    Ok(())
}

/// Format analysis results as JSON
pub fn format_json_report(result: &AnalysisResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}
