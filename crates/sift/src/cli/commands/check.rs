//! Implementation of `sift check`.

use std::process::ExitCode;

use sift_config::{ConfigWarning, discover_config_files};

use crate::cli::{
    context::CommandContext,
    output::{dim, header, subheader, warning},
};

/// Lists config files and dialects, then reports validation warnings.
///
/// Exits with failure when any warning is found.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    println!("{}", subheader("Config files:"));
    let config_files = discover_config_files(&ctx.cwd);
    if config_files.is_empty() {
        println!("   {}", dim("(none, using built-in defaults)"));
    }
    for path in &config_files {
        println!("   {}", path.display());
    }
    println!();

    println!("{}", subheader("Dialects:"));
    for (name, dialect) in &config.dialects {
        let marker = if *name == config.query.dialect {
            header(name)
        } else {
            name.clone()
        };
        println!(
            "   {marker} {}",
            dim(&format!(
                "columns=[{}] operator={} param={}",
                dialect.columns.join(", "),
                dialect.operator,
                dialect.param
            ))
        );
    }
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        let hint = match w {
            ConfigWarning::DialectWithoutColumns { .. } => {
                "Hint: set columns = \"name\" or a list of columns in the dialect"
            }
            ConfigWarning::EmptyOperator { .. } => {
                "Hint: set operator, e.g. operator = \"LIKE\""
            }
            ConfigWarning::AnonymousMultiColumn { .. } => {
                "Hint: use param = \"numbered\", \"dollar\" or \"named\", or keep a single column"
            }
            ConfigWarning::UnknownDefaultDialect { .. } => {
                "Hint: define the dialect with [dialect.NAME] or change query.dialect"
            }
        };
        println!("{}", dim(hint));
    }
}
