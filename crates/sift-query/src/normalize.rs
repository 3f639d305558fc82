//! Query normalizer.
//!
//! Rewrites a human-typed query into the canonical form the parser consumes:
//!
//! 1. `AND` / `OR` letter runs outside quotes become `+` / `,`.
//! 2. Whitespace between two terms outside quotes becomes an explicit `+`.
//! 3. Glob wildcards outside quotes are mapped to SQL ones (`*` → `%`, `?` → `_`).
//!
//! Keyword folding runs as its own pass so that it sees the text before any
//! wildcard mapping or join insertion has changed neighbouring characters.
//! Quoted spans are copied through untouched by both passes.

use crate::classify::{ends_term, starts_term};

/// Folds `AND` and `OR` keywords outside quotes into `+` and `,`.
///
/// A keyword is a maximal run of alphabetic characters equal to `AND` or
/// `OR`. Digits and punctuation end a run, so `x1AND` folds to `x1+` while
/// `cANDy` is one run and is left alone. Unbalanced quotes are tolerated;
/// the parser reports them later.
pub fn fold_keywords(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_quotes = false;
    let mut chars = input.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        if ch == '"' {
            in_quotes = !in_quotes;
            out.push(ch);
            continue;
        }

        if in_quotes || !ch.is_alphabetic() {
            out.push(ch);
            continue;
        }

        let mut end = start + ch.len_utf8();
        while let Some((idx, next)) = chars.next_if(|&(_, c)| c.is_alphabetic()) {
            end = idx + next.len_utf8();
        }

        match &input[start..end] {
            "AND" => out.push('+'),
            "OR" => out.push(','),
            word => out.push_str(word),
        }
    }

    out
}

/// Produces the canonical query string for `raw`.
///
/// The result contains no whitespace outside quoted spans, and
/// `normalize(&normalize(q)) == normalize(q)` for every input.
pub fn normalize(raw: &str) -> String {
    let folded = fold_keywords(raw);
    let mut out = String::with_capacity(folded.len() + 8);
    let mut in_quotes = false;
    // Last character emitted outside quotes; a closing quote counts.
    let mut last: Option<char> = None;
    let mut pending_join = false;

    for ch in folded.chars() {
        if in_quotes {
            out.push(ch);
            if ch == '"' {
                in_quotes = false;
                last = Some(ch);
            }
            continue;
        }

        if ch.is_whitespace() {
            if last.is_some_and(ends_term) {
                pending_join = true;
            }
            continue;
        }

        if matches!(ch, '+' | ',') {
            out.push(ch);
            last = Some(ch);
            pending_join = false;
            continue;
        }

        let mapped = match ch {
            '*' => '%',
            '?' => '_',
            other => other,
        };

        if pending_join && starts_term(mapped) {
            out.push('+');
        }
        if mapped == '"' {
            in_quotes = true;
        }
        out.push(mapped);
        last = Some(mapped);
        pending_join = false;
    }

    out
}
