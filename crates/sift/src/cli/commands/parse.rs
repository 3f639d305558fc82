//! Implementation of `sift parse`.

use std::process::ExitCode;

use serde::Serialize;
use sift_query::{Node, build_tree_with_options, normalize};

use super::shared::prepare_query;
use crate::cli::{
    args::ParseCommand,
    context::CommandContext,
    output::{indent, subheader},
};

/// JSON output for `sift parse`.
#[derive(Serialize)]
struct JsonParseOutput<'a> {
    /// Canonical query string the parser consumed.
    canonical: String,
    /// Parsed expression tree.
    tree: &'a Node,
}

/// Parses the query and prints its expression tree.
pub fn run(ctx: &CommandContext, cmd: &ParseCommand) -> ExitCode {
    let input = prepare_query(&ctx.config, &cmd.input.query, cmd.no_sanitize);

    let tree = match build_tree_with_options(&input, &ctx.config.parse_options()) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let canonical = normalize(&input);

    if cmd.json {
        let output = JsonParseOutput {
            canonical,
            tree: &tree,
        };
        return match serde_json::to_string_pretty(&output) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: failed to serialize JSON: {e}");
                ExitCode::FAILURE
            }
        };
    }

    println!("{}", subheader("Canonical:"));
    println!("   {canonical}");
    println!();
    println!("{}", subheader("Tree:"));
    println!("{}", indent(&tree.to_string()));
    ExitCode::SUCCESS
}
