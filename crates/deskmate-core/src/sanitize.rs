//! Sanitization for user-submitted text.
//!
//! Chat input gets echoed back into whatever surface renders the
//! conversation, so the obvious injection vectors are stripped before a
//! turn is recorded.

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script>").unwrap());
static JAVASCRIPT_URI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)javascript:").unwrap());
static EVENT_HANDLER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)on\w+\s*=").unwrap());

/// Strips script blocks, `javascript:` URIs and inline event-handler
/// attributes from `input`, then trims surrounding whitespace.
///
/// The result may be empty; callers decide whether an empty result is an
/// error (it is for user turns).
pub fn sanitize_input(input: &str) -> String {
    let cleaned = SCRIPT_BLOCK_RE.replace_all(input, "");
    let cleaned = JAVASCRIPT_URI_RE.replace_all(&cleaned, "");
    let cleaned = EVENT_HANDLER_RE.replace_all(&cleaned, "");
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_blocks() {
        assert_eq!(
            sanitize_input("before<script>alert(1)</script>after"),
            "beforeafter"
        );
    }

    #[test]
    fn strips_script_blocks_across_lines_and_case() {
        assert_eq!(
            sanitize_input("a<SCRIPT type=\"text/javascript\">\nalert(1)\n</SCRIPT>b"),
            "ab"
        );
    }

    #[test]
    fn strips_javascript_uris() {
        assert_eq!(sanitize_input("open javascript:alert(1)"), "open alert(1)");
    }

    #[test]
    fn strips_event_handler_attributes() {
        assert_eq!(sanitize_input("<img onerror=alert(1)>"), "<img alert(1)>");
        assert_eq!(sanitize_input("<img onerror =alert(1)>"), "<img alert(1)>");
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(sanitize_input("  hello there  "), "hello there");
    }

    #[test]
    fn markup_only_input_becomes_empty() {
        assert_eq!(sanitize_input("<script>alert(1)</script>"), "");
        assert_eq!(sanitize_input("   \t\n"), "");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(
            sanitize_input("What's the weather today?"),
            "What's the weather today?"
        );
    }
}
