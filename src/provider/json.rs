//! Extraction of JSON payloads from model output.

/// Extract a JSON object from a completion that might wrap it in markdown.
///
/// Handles ```json fences, plain ``` fences, and raw objects.
pub(crate) fn extract_json_object(text: &str) -> Option<String> {
    if let Some(start) = text.find("```json") {
        let json_start = start + 7;
        if let Some(end) = text[json_start..].find("```") {
            return Some(text[json_start..json_start + end].trim().to_string());
        }
    }

    if let Some(start) = text.find("```") {
        let block_start = start + 3;
        let content_start = text[block_start..]
            .find('\n')
            .map(|i| block_start + i + 1)
            .unwrap_or(block_start);
        if let Some(end) = text[content_start..].find("```") {
            return Some(text[content_start..content_start + end].trim().to_string());
        }
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            return Some(text[start..=end].to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_object() {
        assert_eq!(
            extract_json_object(r#"{"a": 1}"#).as_deref(),
            Some(r#"{"a": 1}"#)
        );
    }

    #[test]
    fn test_json_fence() {
        let text = "Here is the analysis:\n```json\n{\"a\": 1}\n```\nDone.";
        assert_eq!(extract_json_object(text).as_deref(), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_plain_fence() {
        let text = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json_object(text).as_deref(), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_object_with_surrounding_prose() {
        let text = "The result is {\"level\": \"LOW\"} as requested";
        assert_eq!(
            extract_json_object(text).as_deref(),
            Some("{\"level\": \"LOW\"}")
        );
    }

    #[test]
    fn test_no_object() {
        assert_eq!(extract_json_object("no json here"), None);
    }
}
