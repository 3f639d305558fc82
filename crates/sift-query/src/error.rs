//! Error types for query parsing.
//!
//! Every failure is a malformed-input error raised synchronously by the
//! parser. The first one aborts the parse; there is no partial tree.

use std::fmt;

use thiserror::Error;

/// The specific kind of parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseErrorKind {
    /// A term was required but none was found.
    #[error("expected variable")]
    EmptyTerm,

    /// A quoted span ran to the end of the input.
    #[error("unterminated quoted variable")]
    UnterminatedQuote,

    /// An opening parenthesis was never closed.
    #[error("missing closing parenthesis")]
    UnmatchedParenthesis,

    /// An exact-match marker was combined with wildcard characters.
    #[error("wildcards in exact match")]
    ExactWithWildcard,

    /// Input remained after a complete expression, e.g. a stray `)`.
    #[error("unexpected character")]
    UnexpectedCharacter,

    /// Parentheses were nested deeper than the configured limit.
    #[error("nesting too deep")]
    NestingTooDeep,
}

impl ParseErrorKind {
    /// Returns a suggestion for fixing the query.
    pub fn suggestion(self) -> &'static str {
        match self {
            Self::EmptyTerm => "Operators need a term on both sides, e.g. 'a+b' or 'a,b'",
            Self::UnterminatedQuote => "Add a closing quote (\") to complete the phrase",
            Self::UnmatchedParenthesis => {
                "Add a closing parenthesis ) to match the opening one"
            }
            Self::ExactWithWildcard => "Drop the '=' or '^...$' marker, or remove * ? % _",
            Self::UnexpectedCharacter => "Remove the stray character or join it with + or ,",
            Self::NestingTooDeep => "Flatten the query by removing redundant parentheses",
        }
    }
}

/// Parse error with the cursor position where parsing stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error that occurred.
    pub kind: ParseErrorKind,
    /// Byte offset into `input` where the parser stopped.
    pub position: usize,
    /// The canonical query that was being parsed.
    pub input: String,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(kind: ParseErrorKind, position: usize, input: &str) -> Self {
        Self {
            kind,
            position,
            input: input.to_string(),
        }
    }

    /// Returns the error message without context.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Formats the error with a position indicator showing where the error occurred.
    pub fn format_with_context(&self) -> String {
        let column = self
            .input
            .get(..self.position.min(self.input.len()))
            .map_or(0, |prefix| prefix.chars().count());

        let mut result = String::new();
        result.push_str(&format!("query syntax error: {}\n", self.kind));
        result.push_str(&format!("  {}\n", self.input));
        result.push_str(&format!("  {}^\n", " ".repeat(column)));
        result.push_str(&format!("hint: {}", self.kind.suggestion()));
        result
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_context())
    }
}

impl std::error::Error for ParseError {}
