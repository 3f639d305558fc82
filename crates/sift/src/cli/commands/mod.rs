//! Command implementations and dispatch.

pub mod check;
pub mod compile;
pub mod config;
pub mod init;
pub mod normalize;
pub mod parse;
pub mod sanitize;
mod shared;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Normalize(args) => normalize::run(&args),
        Commands::Sanitize(args) => sanitize::run(&args),
        Commands::Parse(cmd) => parse::run(ctx, &cmd),
        Commands::Compile(cmd) => compile::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Check => check::run(ctx),
    }
}
