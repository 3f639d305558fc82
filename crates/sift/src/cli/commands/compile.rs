//! Implementation of `sift compile`.

use std::{collections::BTreeMap, process::ExitCode};

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use sift_query::{
    CompiledQuery, ParamStyle, build_tree_with_options, flat_query, indexed_named_args,
};

use super::shared::prepare_query;
use crate::cli::{
    args::CompileCommand,
    context::CommandContext,
    output::{dim, subheader},
};

/// JSON output for `sift compile`.
#[derive(Serialize)]
struct JsonCompileOutput<'a> {
    /// Dialect the terms were rendered with.
    dialect: &'a str,
    /// Compiled fragment and positional arguments.
    #[serde(flatten)]
    query: &'a CompiledQuery,
    /// Arguments keyed by parameter name, for the named style only.
    #[serde(skip_serializing_if = "Option::is_none")]
    named_args: Option<BTreeMap<String, String>>,
}

/// Compiles the query and prints the fragment with its arguments.
pub fn run(ctx: &CommandContext, cmd: &CompileCommand) -> ExitCode {
    let config = &ctx.config;
    let dialect_name = cmd.dialect.as_deref().unwrap_or(&config.query.dialect);
    let dialect = match config.dialect(dialect_name) {
        Ok(dialect) => dialect,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // The flat format always numbers its placeholders.
    let style = if cmd.flat {
        ParamStyle::Numbered
    } else {
        dialect.param
    };

    if !cmd.flat && dialect.misaligns_args() {
        eprintln!(
            "error: dialect '{dialect_name}' uses anonymous parameters with {} columns; \
             placeholders would not match arguments",
            dialect.columns.len()
        );
        return ExitCode::FAILURE;
    }

    let input = prepare_query(config, &cmd.input.query, cmd.no_sanitize);

    let query = if cmd.flat {
        flat_query(&input, |placeholder, _exact| {
            dialect.render_placeholder(placeholder, true)
        })
    } else {
        match build_tree_with_options(&input, &config.parse_options()) {
            Ok(tree) => tree.compile(dialect),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        }
    };

    if cmd.json {
        let output = JsonCompileOutput {
            dialect: dialect_name,
            query: &query,
            named_args: (style == ParamStyle::Named)
                .then(|| indexed_named_args(&query.args).into_iter().collect()),
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

    if query.args.is_empty() {
        println!("{}", dim("(empty query)"));
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Fragment:"));
    println!("   {}", query.fragment);
    println!();
    println!("{}", subheader("Arguments:"));
    println!("{}", args_table(&query.args, style));
    ExitCode::SUCCESS
}

/// Builds the argument table shown under the fragment.
fn args_table(args: &[String], style: ParamStyle) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Placeholder", "Value"]);
    for (i, arg) in args.iter().enumerate() {
        let index = i + 1;
        table.add_row(vec![
            Cell::new(index),
            Cell::new(style.placeholder(index)),
            Cell::new(arg),
        ]);
    }
    table
}
