//! Character classes used by the normalizer and parser.

/// Returns true for characters that may appear inside a bare search term.
///
/// Letters, digits, and the match/wildcard decorations `- _ = ^ $ . % * ? :`.
pub fn is_word_char(c: char) -> bool {
    c.is_alphabetic()
        || c.is_numeric()
        || matches!(c, '-' | '_' | '=' | '^' | '$' | '.' | '%' | '*' | '?' | ':')
}

/// Returns true for word characters plus grouping punctuation.
pub fn is_search_term_char(c: char) -> bool {
    is_word_char(c) || c == '(' || c == ')'
}

/// Returns true if a term can end with `c` (a closing quote counts).
pub(crate) fn ends_term(c: char) -> bool {
    is_word_char(c) || c == ')' || c == '"'
}

/// Returns true if a term can begin with `c` (an opening quote counts).
pub(crate) fn starts_term(c: char) -> bool {
    is_word_char(c) || c == '(' || c == '"' || c == '!'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_chars() {
        for c in ['a', 'Z', '7', '-', '_', '=', '^', '$', '.', '%', '*', '?', ':', 'é'] {
            assert!(is_word_char(c), "{c:?} should be a word char");
        }
        for c in [' ', '+', ',', '(', ')', '"', '!', '\t'] {
            assert!(!is_word_char(c), "{c:?} should not be a word char");
        }
    }

    #[test]
    fn search_term_chars_include_grouping() {
        assert!(is_search_term_char('('));
        assert!(is_search_term_char(')'));
        assert!(is_search_term_char('x'));
        assert!(!is_search_term_char('+'));
        assert!(!is_search_term_char(','));
        assert!(!is_search_term_char(' '));
    }

    #[test]
    fn term_boundaries() {
        assert!(ends_term(')'));
        assert!(!ends_term('('));
        assert!(starts_term('('));
        assert!(!starts_term(')'));
        assert!(starts_term('!'));
        assert!(ends_term('"') && starts_term('"'));
    }
}
