#[cfg(test)]
mod tests {
    use crate::repositories::listing::escape_like;
    use proptest::prelude::*;

    /// Undo `escape_like`, failing on a dangling or needless escape.
    fn unescape(pattern: &str) -> Option<String> {
        let mut out = String::new();
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next()? {
                    e @ ('\\' | '%' | '_') => out.push(e),
                    _ => return None,
                },
                '%' | '_' => return None,
                other => out.push(other),
            }
        }
        Some(out)
    }

    #[test]
    fn test_escape_like_examples() {
        assert_eq!(escape_like("Paris"), "Paris");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }

    proptest! {
        #[test]
        fn escaped_pattern_has_no_bare_wildcards(term in ".*") {
            prop_assert_eq!(unescape(&escape_like(&term)), Some(term));
        }
    }
}
