//! Depth-tracking brace scanner
//!
//! Every stage that extracts a macro argument goes through this primitive
//! instead of a single-level pattern match, so nested groups (colors, tables,
//! style wrappers, labels) are handled correctly.

/// Parse the content of a brace group starting at byte offset `start`.
///
/// Returns the text strictly between the matching outer brace pair and the
/// byte index just past the closing brace. Returns `None` when `start` does
/// not point at `{` or no matching close exists before end of input; callers
/// treat that as absence and continue from a safe fallback position.
///
/// Offsets are byte offsets. Braces are ASCII, so the returned slice always
/// lands on UTF-8 boundaries even inside multi-byte (e.g. Korean) text.
pub fn parse_nested_braces(s: &str, start: usize) -> Option<(&str, usize)> {
    let bytes = s.as_bytes();
    if start >= bytes.len() || bytes[start] != b'{' {
        return None;
    }

    let content_start = start + 1;
    let mut depth = 0usize;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&s[content_start..i], i + 1));
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_group() {
        assert_eq!(parse_nested_braces("{abc}", 0), Some(("abc", 5)));
    }

    #[test]
    fn test_nested_group() {
        let s = "{a{b{c}}d}rest";
        assert_eq!(parse_nested_braces(s, 0), Some(("a{b{c}}d", 10)));
    }

    #[test]
    fn test_offset_start() {
        let s = "xy{inner}z";
        assert_eq!(parse_nested_braces(s, 2), Some(("inner", 9)));
    }

    #[test]
    fn test_not_a_brace() {
        assert_eq!(parse_nested_braces("abc", 0), None);
        assert_eq!(parse_nested_braces("a{b}", 0), None);
    }

    #[test]
    fn test_unbalanced() {
        assert_eq!(parse_nested_braces("{a{b}", 0), None);
        assert_eq!(parse_nested_braces("{", 0), None);
    }

    #[test]
    fn test_start_past_end() {
        assert_eq!(parse_nested_braces("{a}", 10), None);
    }

    #[test]
    fn test_empty_group() {
        assert_eq!(parse_nested_braces("{}", 0), Some(("", 2)));
    }

    #[test]
    fn test_multibyte_content() {
        let s = "{제1장 총칙}";
        let (inner, end) = parse_nested_braces(s, 0).unwrap();
        assert_eq!(inner, "제1장 총칙");
        assert_eq!(end, s.len());
    }

    #[test]
    fn test_multiline_group() {
        let s = "{first\nsecond {nested}\nthird}";
        let (inner, _) = parse_nested_braces(s, 0).unwrap();
        assert_eq!(inner, "first\nsecond {nested}\nthird");
    }

}
