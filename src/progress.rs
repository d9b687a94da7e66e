//! Spinner for the analysis run

use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Spinner shown while a snapshot is analyzed
///
/// Hidden unless stdout is a terminal and `NO_COLOR` is unset, so JSON
/// output and CI logs stay clean.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    /// Start a spinner with the given message
    pub fn start(enabled: bool, msg: impl Into<String>) -> Self {
        let bar = (enabled && is_interactive()).then(|| {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
                pb.set_style(style);
            }
            pb.set_message(msg.into());
            pb.enable_steady_tick(Duration::from_millis(80));
            pb
        });

        Self { bar }
    }

    /// Replace the spinner message
    pub fn set_message(&self, msg: impl Into<String>) {
        if let Some(bar) = &self.bar {
            bar.set_message(msg.into());
        }
    }

    /// Stop and clear the spinner
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.finish();
    }
}

fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_spinner_has_no_bar() {
        let spinner = Spinner::start(false, "analyzing");
        assert!(spinner.bar.is_none());
    }

    #[test]
    fn test_disabled_spinner_methods_are_noops() {
        let spinner = Spinner::start(false, "analyzing");
        spinner.set_message("still analyzing");
        spinner.finish();
    }
}
