//! Input sanitization
//!
//! Strips markup from free-text input before it is echoed back into the
//! page or sent to the backend.

use regex::Regex;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Removes every `<...>` tag and trims surrounding whitespace
///
/// # Arguments
/// - `input` - Raw user input
///
/// # Returns
/// The input with tags removed. Text between tags is kept, so
/// `"<b>hi</b>"` becomes `"hi"`.
pub fn sanitize_input(input: &str) -> String {
    TAG_RE.replace_all(input, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_input_strips_tags() {
        assert_eq!(sanitize_input("  <b>hi</b> "), "hi");
    }

    #[test]
    fn test_sanitize_input_removes_script_tags_but_keeps_text() {
        assert_eq!(
            sanitize_input("<script>alert(1)</script>Ravi"),
            "alert(1)Ravi"
        );
    }

    #[test]
    fn test_sanitize_input_preserves_plain_text() {
        assert_eq!(sanitize_input("Savings account 1001"), "Savings account 1001");
    }

    #[test]
    fn test_sanitize_input_leaves_unclosed_bracket() {
        assert_eq!(sanitize_input("a < b"), "a < b");
    }
}
