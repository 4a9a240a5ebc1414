//! Content budgeting for provider payloads.

use std::borrow::Cow;

/// Maximum characters of document content sent for comprehensive analysis.
pub const DEFAULT_CONTENT_BUDGET: usize = 12_000;

/// Truncate text to a provider-safe length with a deterministic marker.
///
/// Character-based (not byte-based) so the marker always lands on a char
/// boundary and the truncated output is exactly `limit + 3` characters.
/// No semantic truncation is attempted; the cut may land mid-sentence.
pub fn budget_content(text: &str, limit: usize) -> Cow<'_, str> {
    let mut chars = text.char_indices();
    match chars.nth(limit) {
        None => Cow::Borrowed(text),
        Some((byte_idx, _)) => {
            let mut truncated = String::with_capacity(byte_idx + 3);
            truncated.push_str(&text[..byte_idx]);
            truncated.push_str("...");
            Cow::Owned(truncated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        let text = "a short contract";
        assert_eq!(budget_content(text, DEFAULT_CONTENT_BUDGET), text);
        assert!(matches!(
            budget_content(text, DEFAULT_CONTENT_BUDGET),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_exact_limit_unchanged() {
        let text = "x".repeat(DEFAULT_CONTENT_BUDGET);
        assert_eq!(budget_content(&text, DEFAULT_CONTENT_BUDGET), text);
    }

    #[test]
    fn test_over_limit_truncates_with_marker() {
        let text = "x".repeat(15_000);
        let budgeted = budget_content(&text, DEFAULT_CONTENT_BUDGET);
        assert_eq!(budgeted.chars().count(), 12_003);
        assert!(budgeted.ends_with("..."));
        assert!(budgeted.starts_with('x'));
    }

    #[test]
    fn test_one_over_limit() {
        let text = "y".repeat(DEFAULT_CONTENT_BUDGET + 1);
        let budgeted = budget_content(&text, DEFAULT_CONTENT_BUDGET);
        assert_eq!(budgeted.chars().count(), DEFAULT_CONTENT_BUDGET + 3);
    }

    #[test]
    fn test_multibyte_boundary() {
        let text = "é".repeat(20);
        let budgeted = budget_content(&text, 10);
        assert_eq!(budgeted.chars().count(), 13);
        assert!(budgeted.ends_with("..."));
    }
}
