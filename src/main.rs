use clap::Parser;
use deadweight::cli::{Cli, Commands};
use deadweight::cmd;
use std::process;

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    // Set console emoji mode based on CLI flag
    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let result = match &cli.command {
        Some(Commands::Analyze {
            snapshot,
            json,
            out_dir,
            degrade,
        }) => cmd::cmd_analyze(snapshot, *json, out_dir.as_deref(), *degrade),
        Some(Commands::Init { force }) => cmd::cmd_init(*force),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(*shell);
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("deadweight v{}", env!("CARGO_PKG_VERSION"));
            println!("Static CSS/JS usage analyzer\n");
            println!("Usage: deadweight <COMMAND>\n");
            println!("Commands:");
            println!("  analyze      Analyze a page snapshot");
            println!("  init         Write a default .deadweight.toml");
            println!("  completions  Generate shell completions");
            println!("\nRun 'deadweight <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use deadweight::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
