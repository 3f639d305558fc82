//! Boolean expression tree.
//!
//! Produced by the parser and consumed by the compiler. The tree knows nothing
//! about any backend, so one parse can be compiled against several clause
//! renderers.

use std::fmt;

use serde::Serialize;

use crate::{
    classify::is_word_char,
    compile::{ClauseRenderer, CompiledQuery, compile},
};

/// How a search term is matched, decided from its surface syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Bare word, stored as `%term%`.
    Contains,
    /// `=term`, `^term$` or a quoted phrase, stored bare.
    Exact,
    /// `^term`, stored as `term%`.
    StartsWith,
    /// `term$`, stored as `%term`.
    EndsWith,
    /// Term carrying its own wildcards, stored as typed.
    Wildcard,
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Contains => "contains",
            Self::Exact => "exact",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::Wildcard => "wildcard",
        };
        f.write_str(name)
    }
}

/// A leaf of the expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchTerm {
    /// Term value with wildcard decoration already applied.
    pub text: String,
    /// Match semantics the decoration was derived from.
    pub kind: MatchKind,
}

impl SearchTerm {
    /// Builds a term from undecorated text, applying the decoration for `kind`.
    pub fn new(value: &str, kind: MatchKind) -> Self {
        let text = match kind {
            MatchKind::Contains => format!("%{value}%"),
            MatchKind::StartsWith => format!("{value}%"),
            MatchKind::EndsWith => format!("%{value}"),
            MatchKind::Exact | MatchKind::Wildcard => value.to_string(),
        };
        Self { text, kind }
    }

    /// Returns the term text with the decoration for its kind removed.
    pub fn value(&self) -> &str {
        let text = self.text.as_str();
        match self.kind {
            MatchKind::Contains => text
                .strip_prefix('%')
                .and_then(|t| t.strip_suffix('%'))
                .unwrap_or(text),
            MatchKind::StartsWith => text.strip_suffix('%').unwrap_or(text),
            MatchKind::EndsWith => text.strip_prefix('%').unwrap_or(text),
            MatchKind::Exact | MatchKind::Wildcard => text,
        }
    }

    /// Renders the term in query syntax that parses back to the same term.
    fn to_query_string(&self) -> String {
        let value = self.value();
        match self.kind {
            MatchKind::Contains | MatchKind::Wildcard => value.to_string(),
            MatchKind::StartsWith => format!("^{value}"),
            MatchKind::EndsWith => format!("{value}$"),
            MatchKind::Exact => {
                let bare = !value.is_empty()
                    && value.chars().all(is_word_char)
                    && !value.contains(['^', '$', '%', '_', '*']);
                if bare {
                    format!("={value}")
                } else {
                    format!("\"{value}\"")
                }
            }
        }
    }
}

/// A parsed boolean search expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// A single search term.
    Term(SearchTerm),

    /// Negation of a single operand.
    Not {
        /// Negated expression.
        child: Box<Self>,
    },

    /// Both operands must match.
    And {
        /// Left operand.
        left: Box<Self>,
        /// Right operand.
        right: Box<Self>,
    },

    /// Either operand must match.
    Or {
        /// Left operand.
        left: Box<Self>,
        /// Right operand.
        right: Box<Self>,
    },
}

impl Node {
    /// Creates a leaf from undecorated text.
    pub fn term(value: &str, kind: MatchKind) -> Self {
        Self::Term(SearchTerm::new(value, kind))
    }

    /// Creates a negation.
    pub fn not(child: Self) -> Self {
        Self::Not {
            child: Box::new(child),
        }
    }

    /// Creates a conjunction.
    pub fn and(left: Self, right: Self) -> Self {
        Self::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Creates a disjunction.
    pub fn or(left: Self, right: Self) -> Self {
        Self::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Returns the leaves in left-to-right order.
    ///
    /// This is the order in which the compiler appends arguments.
    pub fn terms(&self) -> Vec<&SearchTerm> {
        let mut out = Vec::new();
        self.collect_terms(&mut out);
        out
    }

    /// Appends the leaves of this subtree to `out`.
    fn collect_terms<'a>(&'a self, out: &mut Vec<&'a SearchTerm>) {
        match self {
            Self::Term(term) => out.push(term),
            Self::Not { child } => child.collect_terms(out),
            Self::And { left, right } | Self::Or { left, right } => {
                left.collect_terms(out);
                right.collect_terms(out);
            }
        }
    }

    /// Number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Term(_) => 1,
            Self::Not { child } => child.leaf_count(),
            Self::And { left, right } | Self::Or { left, right } => {
                left.leaf_count() + right.leaf_count()
            }
        }
    }

    /// Height of the tree; a single leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Self::Term(_) => 1,
            Self::Not { child } => 1 + child.depth(),
            Self::And { left, right } | Self::Or { left, right } => {
                1 + left.depth().max(right.depth())
            }
        }
    }

    /// Compiles this tree; see [`compile`].
    pub fn compile<C>(&self, clause: &C) -> CompiledQuery
    where
        C: ClauseRenderer + ?Sized,
    {
        compile(self, clause)
    }

    /// Binding strength used when rendering query strings.
    fn precedence(&self) -> u8 {
        match self {
            Self::Or { .. } => 1,
            Self::And { .. } => 2,
            Self::Not { .. } | Self::Term(_) => 3,
        }
    }

    /// Formats the expression as a canonical query string.
    ///
    /// The output parses back to an equal tree: `a+b,-(c,d)`.
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        self.fmt_query_string(&mut out);
        out
    }

    /// Writes the query string for this node into `out`.
    fn fmt_query_string(&self, out: &mut String) {
        match self {
            Self::Term(term) => out.push_str(&term.to_query_string()),
            Self::Not { child } => {
                out.push('-');
                child.fmt_operand(out, !matches!(**child, Self::Term(_)));
            }
            Self::And { left, right } | Self::Or { left, right } => {
                let op = if matches!(self, Self::And { .. }) {
                    '+'
                } else {
                    ','
                };
                let prec = self.precedence();
                left.fmt_operand(out, left.precedence() < prec);
                out.push(op);
                right.fmt_operand(out, right.precedence() <= prec);
            }
        }
    }

    /// Writes an operand, wrapped in parentheses when `group` is set.
    fn fmt_operand(&self, out: &mut String, group: bool) {
        if group {
            out.push('(');
            self.fmt_query_string(out);
            out.push(')');
        } else {
            self.fmt_query_string(out);
        }
    }

    /// Formats the expression as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::Term(term) => writeln!(f, "{prefix}Term({:?}, {})", term.text, term.kind),
            Self::Not { child } => {
                writeln!(f, "{prefix}Not")?;
                child.fmt_tree(f, indent + 1)
            }
            Self::And { left, right } => {
                writeln!(f, "{prefix}And")?;
                left.fmt_tree(f, indent + 1)?;
                right.fmt_tree(f, indent + 1)
            }
            Self::Or { left, right } => {
                writeln!(f, "{prefix}Or")?;
                left.fmt_tree(f, indent + 1)?;
                right.fmt_tree(f, indent + 1)
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}
