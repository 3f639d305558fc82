//! Allow-list input sanitizer.
//!
//! An optional first pass for untrusted input: anything outside the
//! characters the query grammar understands is dropped and whitespace is
//! collapsed. It does not make a query valid, it only strips noise.

/// Punctuation kept by [`sanitize`] in addition to ASCII letters and digits.
const ALLOWED_PUNCTUATION: &str = " _,+=\"^$().-:?*%!";

/// Strips disallowed characters, collapses whitespace and trims.
pub fn sanitize(input: &str) -> String {
    let kept: String = input
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || ALLOWED_PUNCTUATION.contains(c))
        .collect();
    normalize_spaces(&kept)
}

/// Collapses every run of whitespace into a single space and trims the ends.
pub fn normalize_spaces(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_grammar_characters() {
        let query = "=BCL6+\"full name\",(a-b)^x$ !c *d? e%_:f.g";
        assert_eq!(sanitize(query), query);
    }

    #[test]
    fn drops_disallowed_characters() {
        assert_eq!(sanitize("a;b'c<d>"), "abcd");
        assert_eq!(sanitize("drop table; --"), "drop table --");
        assert_eq!(sanitize("caf\u{e9}"), "caf");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(sanitize("  a \t\n b  "), "a b");
        assert_eq!(normalize_spaces("a    b"), "a b");
    }

    #[test]
    fn tabs_are_dropped_before_collapsing() {
        assert_eq!(sanitize("a\tb"), "ab");
    }
}
