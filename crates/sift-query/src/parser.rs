//! Query parser.
//!
//! Parses a canonical query string (see [`normalize`](crate::normalize)) into
//! an expression tree using recursive descent over a byte cursor.
//!
//! # Grammar
//!
//! ```text
//! expr       → and_clause ("," and_clause)*
//! and_clause → not_clause ("+" not_clause)*
//! not_clause → ("-" | "!")? atom
//! atom       → "(" expr ")" | "="? quoted | bare_term
//! quoted     → '"' <any char except '"'>* '"'
//! bare_term  → word_char+
//! ```
//!
//! # Precedence (highest to lowest)
//!
//! 1. Grouping: `(...)`
//! 2. Negation: `-` / `!`, applying to one atom only
//! 3. AND: `+`
//! 4. OR: `,`
//!
//! Whitespace is skipped between tokens.

use tracing::debug;

use crate::{
    ast::{MatchKind, Node, SearchTerm},
    classify::is_word_char,
    error::{ParseError, ParseErrorKind},
    normalize::normalize,
};

/// Characters that make a bare term a wildcard pattern.
const WILDCARDS: [char; 3] = ['%', '_', '*'];

/// Limits applied while parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting of parenthesised groups, `None` for unlimited.
    pub max_depth: Option<usize>,
}

impl ParseOptions {
    /// Options with a nesting limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }
}

/// Recursive descent parser for canonical query strings.
struct Parser<'a> {
    /// Canonical query being parsed.
    input: &'a str,
    /// Byte offset of the cursor.
    position: usize,
    /// Current group nesting.
    depth: usize,
    /// Nesting limit, if any.
    max_depth: Option<usize>,
}

impl<'a> Parser<'a> {
    /// Creates a parser positioned at the start of `input`.
    fn new(input: &'a str, options: &ParseOptions) -> Self {
        Self {
            input,
            position: 0,
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    /// Parses the whole input into a single expression.
    fn parse(mut self) -> Result<Node, ParseError> {
        let expr = self.parse_or()?;

        self.skip_whitespace();
        if self.peek().is_some() {
            return Err(self.error(ParseErrorKind::UnexpectedCharacter));
        }

        Ok(expr)
    }

    /// Parses: expr → and_clause ("," and_clause)*
    fn parse_or(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_and()?;

        loop {
            self.skip_whitespace();
            if !self.eat(',') {
                break;
            }
            let right = self.parse_and()?;
            left = Node::or(left, right);
        }

        Ok(left)
    }

    /// Parses: and_clause → not_clause ("+" not_clause)*
    fn parse_and(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_not()?;

        loop {
            self.skip_whitespace();
            if !self.eat('+') {
                break;
            }
            let right = self.parse_not()?;
            left = Node::and(left, right);
        }

        Ok(left)
    }

    /// Parses: not_clause → ("-" | "!")? atom
    fn parse_not(&mut self) -> Result<Node, ParseError> {
        self.skip_whitespace();

        if matches!(self.peek(), Some('-' | '!')) {
            self.advance();
            let child = self.parse_atom()?;
            return Ok(Node::not(child));
        }

        self.parse_atom()
    }

    /// Parses: atom → "(" expr ")" | "="? quoted | bare_term
    fn parse_atom(&mut self) -> Result<Node, ParseError> {
        self.skip_whitespace();

        match self.peek() {
            Some('(') => self.parse_group(),
            Some('"') => self.parse_quoted(),
            Some('=') if self.rest().starts_with("=\"") => {
                self.advance(); // consume =
                self.parse_quoted()
            }
            _ => self.parse_bare_term(),
        }
    }

    /// Parses a parenthesized group, consuming the surrounding parentheses.
    fn parse_group(&mut self) -> Result<Node, ParseError> {
        let open = self.position;
        self.advance(); // consume (

        self.depth += 1;
        if self.max_depth.is_some_and(|max| self.depth > max) {
            return Err(self.error_at(ParseErrorKind::NestingTooDeep, open));
        }

        let inner = self.parse_or()?;

        self.skip_whitespace();
        if !self.eat(')') {
            return Err(self.error(ParseErrorKind::UnmatchedParenthesis));
        }
        self.depth -= 1;

        Ok(inner)
    }

    /// Parses a quoted phrase as an exact term, keeping every character.
    fn parse_quoted(&mut self) -> Result<Node, ParseError> {
        let open = self.position;
        self.advance(); // consume opening quote

        let start = self.position;
        while let Some(ch) = self.peek() {
            if ch == '"' {
                break;
            }
            self.advance();
        }

        if self.peek().is_none() {
            return Err(self.error_at(ParseErrorKind::UnterminatedQuote, open));
        }

        let text = &self.input[start..self.position];
        self.advance(); // consume closing quote

        if text.is_empty() {
            return Err(self.error_at(ParseErrorKind::EmptyTerm, open));
        }

        Ok(Node::term(text, MatchKind::Exact))
    }

    /// Parses a run of word characters and classifies it.
    fn parse_bare_term(&mut self) -> Result<Node, ParseError> {
        let start = self.position;
        while self.peek().is_some_and(is_word_char) {
            self.advance();
        }

        if start == self.position {
            return Err(self.error(ParseErrorKind::EmptyTerm));
        }

        let term = classify_term(&self.input[start..self.position])
            .map_err(|kind| self.error_at(kind, start))?;
        Ok(Node::Term(term))
    }

    /// Returns the unparsed remainder of the input.
    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Returns the current character without consuming it.
    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Advances past the current character.
    fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            self.position += ch.len_utf8();
        }
    }

    /// Consumes `expected` if it is the current character.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skips whitespace so tokens never carry leading or trailing spaces.
    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Creates an error at the cursor.
    fn error(&self, kind: ParseErrorKind) -> ParseError {
        self.error_at(kind, self.position)
    }

    /// Creates an error at a specific byte offset.
    fn error_at(&self, kind: ParseErrorKind, position: usize) -> ParseError {
        ParseError::new(kind, position, self.input)
    }
}

/// Classifies a bare term by its surface form and applies its decoration.
///
/// - `=term` or `^term$`: exact; wildcards are an error.
/// - contains `%`, `_` or `*`: wildcard pattern, used as typed.
/// - `^term`: starts with.
/// - `term$`: ends with.
/// - anything else: contains.
///
/// Exact, prefix and suffix markers are stripped before the text is stored.
fn classify_term(raw: &str) -> Result<SearchTerm, ParseErrorKind> {
    let has_wildcards = raw.contains(WILDCARDS);
    let is_exact = raw.starts_with('=') || (raw.starts_with('^') && raw.ends_with('$'));

    if is_exact {
        if has_wildcards {
            return Err(ParseErrorKind::ExactWithWildcard);
        }
        let value = raw.strip_prefix('=').unwrap_or(raw);
        let value = value.strip_prefix('^').unwrap_or(value);
        let value = value.strip_suffix('$').unwrap_or(value);
        return non_empty(value).map(|v| SearchTerm::new(v, MatchKind::Exact));
    }

    let anchored_start = raw.strip_prefix('^');
    let anchored_end = raw.strip_suffix('$');
    let value = anchored_start.or(anchored_end).unwrap_or(raw);
    let value = non_empty(value)?;

    let kind = if has_wildcards {
        MatchKind::Wildcard
    } else if anchored_start.is_some() {
        MatchKind::StartsWith
    } else if anchored_end.is_some() {
        MatchKind::EndsWith
    } else {
        MatchKind::Contains
    };

    Ok(SearchTerm::new(value, kind))
}

/// Rejects a term whose markers left nothing behind.
fn non_empty(value: &str) -> Result<&str, ParseErrorKind> {
    if value.is_empty() {
        Err(ParseErrorKind::EmptyTerm)
    } else {
        Ok(value)
    }
}

/// Parses a canonical query string into an expression tree.
///
/// The input should already be normalized; use [`build_tree`] for raw user
/// input.
pub fn parse(canonical: &str) -> Result<Node, ParseError> {
    parse_with_options(canonical, &ParseOptions::default())
}

/// Parses a canonical query string, enforcing `options`.
pub fn parse_with_options(canonical: &str, options: &ParseOptions) -> Result<Node, ParseError> {
    Parser::new(canonical, options).parse()
}

/// Normalizes raw user input and parses it.
pub fn build_tree(raw: &str) -> Result<Node, ParseError> {
    build_tree_with_options(raw, &ParseOptions::default())
}

/// Normalizes raw user input and parses it, enforcing `options`.
pub fn build_tree_with_options(raw: &str, options: &ParseOptions) -> Result<Node, ParseError> {
    let canonical = normalize(raw);
    debug!(raw, canonical = %canonical, "normalized query");
    parse_with_options(&canonical, options)
}
