//! Flat query format.
//!
//! A non-recursive alternative to the full grammar for simple search boxes:
//! `,` separates OR groups, `+` or whitespace separates the AND terms inside
//! a group, and `=` (optionally before a quoted phrase) marks an exact term.
//! There is no negation or grouping, and nothing here can fail.

use std::sync::LazyLock;

use regex::Regex;

use crate::compile::CompiledQuery;

/// Matches one term: an optionally exact quoted phrase or bare word.
static TERM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(=)?"([^"]+)"|(=)?([^"+,\s]+)"#).expect("term pattern is a valid regex")
});

/// A term in a flat query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatTerm {
    /// Term text without markers or quotes.
    pub value: String,
    /// Whether the term was marked exact with `=`.
    pub exact: bool,
}

/// Splits a flat query into OR groups of AND terms.
///
/// `foo+bar,"x y"` yields `[[foo, bar], ["x y"]]`. Empty groups are dropped.
pub fn parse_flat(query: &str) -> Vec<Vec<FlatTerm>> {
    query
        .split(',')
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(|group| {
            TERM_PATTERN
                .captures_iter(group)
                .filter_map(|caps| {
                    let exact = caps.get(1).is_some() || caps.get(3).is_some();
                    let value = caps
                        .get(2)
                        .or_else(|| caps.get(4))
                        .map_or("", |m| m.as_str().trim());
                    (!value.is_empty()).then(|| FlatTerm {
                        value: value.to_string(),
                        exact,
                    })
                })
                .collect::<Vec<_>>()
        })
        .filter(|terms| !terms.is_empty())
        .collect()
}

/// Compiles a flat query into `(a AND b) OR (c)` form.
///
/// Non-exact values are wrapped as `%value%`. `clause` receives the `?N`
/// placeholder and the exact flag for each term.
pub fn flat_query<F>(query: &str, clause: F) -> CompiledQuery
where
    F: Fn(&str, bool) -> String,
{
    let mut args = Vec::new();
    let mut groups = Vec::new();

    for group in parse_flat(query) {
        let mut clauses = Vec::with_capacity(group.len());
        for term in group {
            if term.exact {
                args.push(term.value);
            } else {
                args.push(format!("%{}%", term.value));
            }
            let placeholder = format!("?{}", args.len());
            clauses.push(clause(&placeholder, term.exact));
        }
        groups.push(format!("({})", clauses.join(" AND ")));
    }

    CompiledQuery {
        fragment: groups.join(" OR "),
        args,
    }
}
