//! Query compiler.
//!
//! Walks an expression tree depth-first, left to right, collecting one
//! argument per leaf and rendering each leaf through a caller-supplied
//! [`ClauseRenderer`]. The renderer is the only backend-specific piece.
//!
//! Parentheses are decided on the way down: a binary node wraps itself only
//! when its parent asked for it, so the root never carries a redundant outer
//! pair and nested operators always keep their precedence.

use serde::Serialize;
use tracing::debug;

use crate::{ast::Node, error::ParseError, parser::build_tree};

/// Renders a single search term into backend syntax.
pub trait ClauseRenderer {
    /// Renders the leaf whose argument sits at 1-based `index`.
    ///
    /// `needs_parens` is set when the leaf is an operand of `AND` / `OR`, so a
    /// renderer that emits a compound predicate can group it.
    fn render(&self, index: usize, text: &str, needs_parens: bool) -> String;
}

impl<F> ClauseRenderer for F
where
    F: Fn(usize, &str, bool) -> String,
{
    fn render(&self, index: usize, text: &str, needs_parens: bool) -> String {
        self(index, text, needs_parens)
    }
}

/// A compiled query fragment and its positional arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompiledQuery {
    /// Backend query fragment, e.g. a SQL `WHERE` body.
    pub fragment: String,
    /// Term values; element `i` is bound to placeholder `i + 1`.
    pub args: Vec<String>,
}

/// Compiles `tree` into a fragment and its ordered arguments.
pub fn compile<C>(tree: &Node, clause: &C) -> CompiledQuery
where
    C: ClauseRenderer + ?Sized,
{
    let mut args = Vec::with_capacity(tree.leaf_count());
    let fragment = compile_node(tree, clause, false, &mut args);
    debug!(args = args.len(), "compiled query");
    CompiledQuery { fragment, args }
}

/// Normalizes, parses and compiles raw user input in one step.
pub fn build_query<C>(raw: &str, clause: &C) -> Result<CompiledQuery, ParseError>
where
    C: ClauseRenderer + ?Sized,
{
    let tree = build_tree(raw)?;
    Ok(compile(&tree, clause))
}

/// Compiles one node, appending leaf values to `args` in visit order.
fn compile_node<C>(
    node: &Node,
    clause: &C,
    needs_parens: bool,
    args: &mut Vec<String>,
) -> String
where
    C: ClauseRenderer + ?Sized,
{
    match node {
        Node::Term(term) => {
            args.push(term.text.clone());
            // The placeholder index is the argument's 1-based position.
            clause.render(args.len(), &term.text, needs_parens)
        }
        Node::Not { child } => {
            // NOT (...) already groups its operand.
            format!("NOT ({})", compile_node(child, clause, false, args))
        }
        Node::And { left, right } => {
            compile_binary(left, right, " AND ", clause, needs_parens, args)
        }
        Node::Or { left, right } => {
            compile_binary(left, right, " OR ", clause, needs_parens, args)
        }
    }
}

/// Compiles both operands of a binary node and joins them with `op`.
fn compile_binary<C>(
    left: &Node,
    right: &Node,
    op: &str,
    clause: &C,
    needs_parens: bool,
    args: &mut Vec<String>,
) -> String
where
    C: ClauseRenderer + ?Sized,
{
    let left = compile_node(left, clause, true, args);
    let right = compile_node(right, clause, true, args);
    if needs_parens {
        format!("({left}{op}{right})")
    } else {
        format!("{left}{op}{right}")
    }
}
