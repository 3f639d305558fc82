//! Clap argument definitions for the `sift` CLI.

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Compile boolean search expressions into parameterized query fragments")]
pub struct Cli {
    /// Verbosity level (-v for debug logs, -vv for trace)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// A query given on the command line.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Search query, e.g. 'gene AND "full name" -excluded'
    pub query: String,
}

/// Arguments for `sift parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    #[command(flatten)]
    /// Query to parse.
    pub input: QueryArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Skip the sanitizer even if the configuration enables it
    #[arg(long)]
    pub no_sanitize: bool,
}

/// Arguments for `sift compile`.
#[derive(Args, Debug, Clone)]
pub struct CompileCommand {
    #[command(flatten)]
    /// Query to compile.
    pub input: QueryArgs,

    /// Dialect used to render each term [default: query.dialect from config]
    #[arg(short = 'd', long)]
    pub dialect: Option<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Skip the sanitizer even if the configuration enables it
    #[arg(long)]
    pub no_sanitize: bool,

    /// Use the flat format: ',' separates groups, no negation or nesting
    #[arg(long)]
    pub flat: bool,
}

/// Arguments for `sift init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.sift.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `sift` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the canonical form of a query
    Normalize(QueryArgs),

    /// Strip characters outside the query alphabet
    Sanitize(QueryArgs),

    /// Show the expression tree for a query
    #[command(after_help = "\
QUERY SYNTAX:
  term              Contains match (%term%)
  =term  ^term$     Exact match
  \"a phrase\"        Exact phrase
  ^term  term$      Starts with / ends with
  te*m  te?m        Wildcards (* any run, ? one character)
  a b  a+b  a AND b Both terms
  a,b  a OR b       Either term
  -term  !term      Term must NOT match
  (expr)            Grouping

EXAMPLES:
  sift parse 'BCL6 OR =TP53'
  sift parse 'gene AND \"full name\" -excluded'
  sift parse '(kinase, phosphatase) -pseudo*' --json")]
    Parse(ParseCommand),

    /// Compile a query into a fragment and its arguments
    #[command(after_help = "\
EXAMPLES:
  sift compile 'A+B,=C'
  sift compile 'BCL6 -pseudo' -d genes
  sift compile 'foo+bar,\"x y\"' --flat --json")]
    Compile(CompileCommand),

    /// Initialize sift configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and list dialects
    Check,
}
