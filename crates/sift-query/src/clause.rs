//! Data-driven clause rendering.
//!
//! [`ClauseTemplate`] lets a caller describe the per-term SQL predicate as data
//! (columns, comparison operator, placeholder style) instead of writing a
//! closure.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::compile::ClauseRenderer;

/// How positional parameters are spelled in the generated fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamStyle {
    /// SQLite-style `?1`.
    #[default]
    Numbered,
    /// Postgres-style `$1`.
    Dollar,
    /// Named `:p1`, paired with [`indexed_named_args`].
    Named,
    /// Bare `?`, for drivers that only bind by position.
    ///
    /// Each `?` consumes one argument, so this style only lines up with the
    /// argument list when a template has at most one column.
    Anonymous,
}

impl ParamStyle {
    /// Returns the placeholder for the 1-based argument `index`.
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Self::Numbered => format!("?{index}"),
            Self::Dollar => format!("${index}"),
            Self::Named => indexed_param(index),
            Self::Anonymous => "?".to_string(),
        }
    }
}

impl fmt::Display for ParamStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Numbered => "numbered",
            Self::Dollar => "dollar",
            Self::Named => "named",
            Self::Anonymous => "anonymous",
        };
        f.write_str(name)
    }
}

/// Renders each term as `column OP placeholder`, one per column, OR-ed together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseTemplate {
    /// Columns the term is matched against.
    pub columns: Vec<String>,
    /// Comparison operator, e.g. `LIKE` or `ILIKE`.
    ///
    /// Applied to every term. Under `LIKE` an exact term that contains `%` or
    /// `_`, such as `"50%"`, still matches as a pattern.
    pub operator: String,
    /// Placeholder spelling.
    pub param: ParamStyle,
}

impl Default for ClauseTemplate {
    fn default() -> Self {
        Self {
            columns: vec!["value".to_string()],
            operator: "LIKE".to_string(),
            param: ParamStyle::Numbered,
        }
    }
}

impl ClauseTemplate {
    /// Renders one term with an already formatted `placeholder`.
    ///
    /// Multiple columns are OR-ed and wrapped in parentheses when
    /// `needs_parens` is set. Without columns the placeholder stands alone.
    pub fn render_placeholder(&self, placeholder: &str, needs_parens: bool) -> String {
        if self.columns.is_empty() {
            return placeholder.to_string();
        }

        let predicates: Vec<String> = self
            .columns
            .iter()
            .map(|column| format!("{column} {} {placeholder}", self.operator))
            .collect();
        let joined = predicates.join(" OR ");

        if needs_parens && predicates.len() > 1 {
            format!("({joined})")
        } else {
            joined
        }
    }

    /// Number of placeholders a single term renders to.
    pub fn placeholders_per_term(&self) -> usize {
        self.columns.len().max(1)
    }

    /// True when rendered placeholders cannot be bound one-to-one with the
    /// compiled arguments: bare `?` repeated across several columns.
    pub fn misaligns_args(&self) -> bool {
        self.param == ParamStyle::Anonymous && self.placeholders_per_term() > 1
    }
}

impl ClauseRenderer for ClauseTemplate {
    fn render(&self, index: usize, _text: &str, needs_parens: bool) -> String {
        self.render_placeholder(&self.param.placeholder(index), needs_parens)
    }
}

/// Name of the named parameter bound to argument `index`: `p1`, `p2`, ...
pub fn indexed_placeholder(index: usize) -> String {
    format!("p{index}")
}

/// Named parameter reference as written in SQL: `:p1`, `:p2`, ...
pub fn indexed_param(index: usize) -> String {
    format!(":{}", indexed_placeholder(index))
}

/// Pairs each argument with its named parameter, `("p1", args[0])` first.
pub fn indexed_named_args(args: &[String]) -> Vec<(String, String)> {
    args.iter()
        .enumerate()
        .map(|(i, arg)| (indexed_placeholder(i + 1), arg.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn genes() -> ClauseTemplate {
        ClauseTemplate {
            columns: vec!["gene_symbol".into(), "ensembl_id".into()],
            operator: "LIKE".into(),
            param: ParamStyle::Named,
        }
    }

    #[test]
    fn placeholders() {
        assert_eq!(ParamStyle::Numbered.placeholder(3), "?3");
        assert_eq!(ParamStyle::Dollar.placeholder(3), "$3");
        assert_eq!(ParamStyle::Named.placeholder(3), ":p3");
        assert_eq!(ParamStyle::Anonymous.placeholder(3), "?");
    }

    #[test]
    fn default_template() {
        let query = parse("a,b").unwrap().compile(&ClauseTemplate::default());
        assert_eq!(query.fragment, "value LIKE ?1 OR value LIKE ?2");
    }

    #[test]
    fn multi_column_groups_when_nested() {
        let query = parse("a+b").unwrap().compile(&genes());
        assert_eq!(
            query.fragment,
            "(gene_symbol LIKE :p1 OR ensembl_id LIKE :p1) AND \
             (gene_symbol LIKE :p2 OR ensembl_id LIKE :p2)"
        );
    }

    #[test]
    fn multi_column_at_root_is_bare() {
        let query = parse("a").unwrap().compile(&genes());
        assert_eq!(query.fragment, "gene_symbol LIKE :p1 OR ensembl_id LIKE :p1");

        let query = parse("-a").unwrap().compile(&genes());
        assert_eq!(
            query.fragment,
            "NOT (gene_symbol LIKE :p1 OR ensembl_id LIKE :p1)"
        );
    }

    #[test]
    fn empty_columns_render_placeholder() {
        let template = ClauseTemplate {
            columns: vec![],
            ..ClauseTemplate::default()
        };
        assert_eq!(template.render(2, "x", true), "?2");
    }

    #[test]
    fn render_placeholder_groups_on_request() {
        let template = genes();
        assert_eq!(
            template.render_placeholder("?4", true),
            "(gene_symbol LIKE ?4 OR ensembl_id LIKE ?4)"
        );
        assert_eq!(
            template.render_placeholder("?4", false),
            "gene_symbol LIKE ?4 OR ensembl_id LIKE ?4"
        );
    }

    #[test]
    fn anonymous_single_column_matches_args() {
        let template = ClauseTemplate {
            columns: vec!["name".into()],
            param: ParamStyle::Anonymous,
            ..ClauseTemplate::default()
        };
        assert!(!template.misaligns_args());

        let query = parse("x+y").unwrap().compile(&template);
        assert_eq!(query.fragment, "name LIKE ? AND name LIKE ?");
        assert_eq!(query.fragment.matches('?').count(), query.args.len());
    }

    #[test]
    fn anonymous_multi_column_is_flagged() {
        let template = ClauseTemplate {
            columns: vec!["a".into(), "b".into()],
            param: ParamStyle::Anonymous,
            ..ClauseTemplate::default()
        };
        assert!(template.misaligns_args());

        let query = parse("x+y").unwrap().compile(&template);
        assert_ne!(query.fragment.matches('?').count(), query.args.len());

        let named = ClauseTemplate {
            param: ParamStyle::Named,
            ..template
        };
        assert!(!named.misaligns_args());
    }

    #[test]
    fn exact_phrase_uses_template_operator() {
        let query = parse("\"50%\"").unwrap().compile(&ClauseTemplate::default());
        assert_eq!(query.fragment, "value LIKE ?1");
        assert_eq!(query.args, vec!["50%".to_string()]);

        let literal = ClauseTemplate {
            operator: "=".into(),
            ..ClauseTemplate::default()
        };
        let query = parse("\"50%\"").unwrap().compile(&literal);
        assert_eq!(query.fragment, "value = ?1");
    }

    #[test]
    fn named_args() {
        let args = vec!["%a%".to_string(), "b".to_string()];
        assert_eq!(
            indexed_named_args(&args),
            vec![
                ("p1".to_string(), "%a%".to_string()),
                ("p2".to_string(), "b".to_string())
            ]
        );
        assert_eq!(indexed_param(7), ":p7");
    }
}
