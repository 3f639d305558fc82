//! Implementation of `sift normalize`.

use std::process::ExitCode;

use sift_query::normalize;

use crate::cli::args::QueryArgs;

/// Prints the canonical form of the query.
pub fn run(args: &QueryArgs) -> ExitCode {
    println!("{}", normalize(&args.query));
    ExitCode::SUCCESS
}
