//! Boolean search expression compiler.
//!
//! Turns a human-typed query into a parameterized, backend-agnostic query
//! fragment:
//!
//! - **Terms**: `BCL6` - matched as "contains" (`%BCL6%`)
//! - **Exact**: `=BCL6`, `^BCL6$` or `"full name"` - matched verbatim
//! - **Anchors**: `^BCL` (starts with), `BCL$` (ends with)
//! - **Wildcards**: `BCL*`, `BCL?` - mapped to SQL `%` and `_`
//! - **AND**: `a+b`, `a AND b` or just `a b`
//! - **OR**: `a,b` or `a OR b`
//! - **NOT**: `-a` or `!a`, applying to a single term or group
//! - **Grouping**: `(a,b)+c`
//!
//! Raw text is [normalized](normalize()) into a canonical string, [parsed](parse())
//! into a [`Node`] tree, and [compiled](compile()) through a caller-supplied
//! [`ClauseRenderer`] into a fragment plus its ordered arguments.
//!
//! # Example
//!
//! ```
//! use sift_query::build_query;
//!
//! let sql = |index: usize, _text: &str, _needs_parens: bool| format!("name LIKE ?{index}");
//! let query = build_query("A B OR =C", &sql).unwrap();
//! assert_eq!(query.fragment, "(name LIKE ?1 AND name LIKE ?2) OR name LIKE ?3");
//! assert_eq!(query.args, ["%A%", "%B%", "C"]);
//! ```

#![warn(missing_docs)]

mod ast;
mod classify;
mod clause;
mod compile;
mod error;
mod flat;
mod normalize;
mod parser;
mod sanitize;

pub use ast::{MatchKind, Node, SearchTerm};
pub use classify::{is_search_term_char, is_word_char};
pub use clause::{
    ClauseTemplate, ParamStyle, indexed_named_args, indexed_param, indexed_placeholder,
};
pub use compile::{ClauseRenderer, CompiledQuery, build_query, compile};
pub use error::{ParseError, ParseErrorKind};
pub use flat::{FlatTerm, flat_query, parse_flat};
pub use normalize::{fold_keywords, normalize};
pub use parser::{
    ParseOptions, build_tree, build_tree_with_options, parse, parse_with_options,
};
pub use sanitize::{normalize_spaces, sanitize};
