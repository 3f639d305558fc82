//! Implementation of `sift sanitize`.

use std::process::ExitCode;

use sift_query::sanitize;

use crate::cli::args::QueryArgs;

/// Prints the query with disallowed characters removed.
pub fn run(args: &QueryArgs) -> ExitCode {
    println!("{}", sanitize(&args.query));
    ExitCode::SUCCESS
}
