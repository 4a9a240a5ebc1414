//! Prompt templates for the analysis provider.
//!
//! Templates use `{jurisdiction}`, `{file_name}`, and `{content}`
//! placeholders. The JSON schemas described here must stay in sync with the
//! result types in `models::report`.

pub(crate) const SYSTEM_PROMPT: &str = "You are a legal document analyst. \
You respond with a single JSON object and nothing else: no markdown fences, \
no commentary, no trailing text.";

pub(crate) const DEFAULT_ANALYSIS_PROMPT: &str = r#"Perform a comprehensive legal risk analysis of the following document under the laws of {jurisdiction}.

Document name: {file_name}

Return a JSON object with exactly this shape:
{
  "riskAssessment": {
    "level": "LOW" | "MEDIUM" | "HIGH" | "CRITICAL",
    "score": <number 0-10>,
    "serviceProviderRisks": [<strings, optional>],
    "clientRisks": [<strings, optional>],
    "factors": [<strings, optional>]
  },
  "summary": "<executive summary>",
  "keyFindings": [
    {
      "category": "<clause or topic>",
      "finding": "<what was found>",
      "impact": "<impact, optional>",
      "severity": "info" | "warning" | "critical",
      "affectedParty": "<party, optional>"
    }
  ],
  "recommendations": [<strings>] or [{"category": "...", "recommendation": "...", "implementation": "..."}],
  "legalCitations": [<strings, optional>]
}

Document content:
{content}"#;

pub(crate) const DEFAULT_REDACTION_PROMPT: &str = r#"The following legal document contains redacted (intentionally hidden) content. Assess the impact of the missing information on enforceability and risk exposure under the laws of {jurisdiction}. Locate redaction markers (black boxes transcribed as █ or [REDACTED], XXXX runs, bracketed omissions) and classify them.

Document name: {file_name}

Return a JSON object with exactly this shape:
{
  "redactionDetection": {
    "redactedSections": <count>,
    "visibleContentPercentage": <number 0-100>,
    "integrityCheck": { "consistencyScore": <number 0-100> },
    "redactionTypes": [
      { "type": "<kind>", "count": <n>, "description": "<what is hidden>", "riskLevel": "LOW" | "MEDIUM" | "HIGH" | "CRITICAL" }
    ]
  },
  "riskAssessment": {
    "level": "LOW" | "MEDIUM" | "HIGH" | "CRITICAL",
    "score": <number 0-10>,
    "limitationNotice": "<what this assessment cannot determine due to redactions>",
    "factors": [<strings>]
  },
  "granularClauseImpact": [
    {
      "clauseType": "<clause>",
      "visibleContent": "<what remains visible>",
      "redactedElements": [<strings>],
      "enforceabilityImpact": { "level": "LOW" | "MEDIUM" | "HIGH" | "CRITICAL", "description": "<impact>" },
      "recommendations": [<strings>]
    }
  ],
  "impactAssessment": {
    "criticalGaps": [<strings>],
    "legalExposure": [<strings>]
  },
  "recommendations": [<strings>],
  "nextSteps": [<strings>]
}

Document content:
{content}"#;

/// Fill a prompt template's placeholders.
pub(crate) fn render(template: &str, jurisdiction: &str, file_name: &str, content: &str) -> String {
    template
        .replace("{jurisdiction}", jurisdiction)
        .replace("{file_name}", file_name)
        .replace("{content}", content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fills_placeholders() {
        let rendered = render(DEFAULT_ANALYSIS_PROMPT, "US", "nda.txt", "some text");
        assert!(rendered.contains("laws of US"));
        assert!(rendered.contains("Document name: nda.txt"));
        assert!(rendered.ends_with("some text"));
        assert!(!rendered.contains("{jurisdiction}"));
    }

    #[test]
    fn test_default_prompts_carry_placeholders() {
        for template in [DEFAULT_ANALYSIS_PROMPT, DEFAULT_REDACTION_PROMPT] {
            assert!(template.contains("{jurisdiction}"));
            assert!(template.contains("{content}"));
        }
    }
}
