//! Command-line interface for the `sift` query compiler.

use std::{io, process::ExitCode};

use clap::Parser;
use sift::cli::{
    CommandContext,
    args::{Cli, Commands},
    commands,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Commands that never read configuration must keep working when a config file is broken.
    let ctx = match cli.command {
        Commands::Normalize(_) | Commands::Sanitize(_) | Commands::Init(_) => {
            CommandContext::load_cwd_only()
        }
        _ => CommandContext::load(),
    };

    match ctx {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}

/// Installs the stderr log subscriber.
///
/// `-v` selects debug and `-vv` trace; without it `RUST_LOG` applies, defaulting to warnings.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}
