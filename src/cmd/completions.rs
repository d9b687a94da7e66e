//! Completions command implementation
//!
//! Handles `deadweight completions <SHELL>`, which prints a completion
//! script for bash, zsh, fish, etc.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::Write;

use crate::cli::Cli;

/// Generate shell completion scripts on stdout
///
/// # Examples
///
/// ```bash
/// # Bash
/// deadweight completions bash > /etc/bash_completion.d/deadweight
///
/// # Zsh
/// deadweight completions zsh > ~/.zfunc/_deadweight
///
/// # Fish
/// deadweight completions fish > ~/.config/fish/completions/deadweight.fish
/// ```
pub fn cmd_completions(shell: Shell) {
    write_completions(shell, &mut std::io::stdout());
}

/// Write the completion script for `shell` into `out`
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, out);
}
