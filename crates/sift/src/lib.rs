//! sift: boolean search expressions for parameterized queries.
//!
//! Users type searches like `gene AND "full name" -excluded`. sift normalizes the text,
//! parses it into an expression tree and compiles the tree into a query fragment with
//! positional placeholders, returning the matching argument values separately so they can
//! be bound by a database driver instead of being spliced into SQL.
//!
//! The heavy lifting lives in `sift-query`; `sift-config` supplies the named dialects that
//! decide how each term is rendered. This crate is the command-line front end.

#![warn(missing_docs)]

pub mod cli;
