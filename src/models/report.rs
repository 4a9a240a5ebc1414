//! Analysis request and result types.
//!
//! Result types mirror the JSON the analysis provider returns, so they are
//! serde camelCase throughout and round-trip cleanly through JSON export.

use serde::{Deserialize, Serialize};

/// Risk level assigned by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Severity of an individual finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// How a document should be analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Comprehensive,
}

/// Request for a single-document comprehensive analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Budgeted document text.
    pub content: String,
    /// Jurisdiction the analysis should be framed in.
    pub jurisdiction: String,
    pub analysis_mode: AnalysisMode,
    pub file_name: String,
    pub file_size: u64,
    pub file_type: String,
}

/// Request for a redaction-impact analysis. Content is never budgeted:
/// the provider needs the full text to locate redaction markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactionRequest {
    pub content: String,
    pub jurisdiction: String,
    pub file_name: String,
    pub file_size: u64,
    pub file_type: String,
}

/// Risk assessment block of a comprehensive analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// Score on a 0-10 scale.
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_provider_risks: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_risks: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factors: Option<Vec<String>>,
}

/// A single finding in a comprehensive analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyFinding {
    pub category: String,
    pub finding: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_party: Option<String>,
}

/// A structured recommendation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredRecommendation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation: Option<String>,
}

impl StructuredRecommendation {
    /// Display label for the entry. Entries without a category get the
    /// default "Recommendation" label.
    pub fn label(&self) -> &str {
        self.category.as_deref().unwrap_or("Recommendation")
    }
}

/// Recommendations come back from the provider in one of two shapes:
/// a plain list of strings or a list of structured objects. The shape is
/// resolved once at deserialization so downstream code never re-inspects
/// element types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recommendations {
    Plain(Vec<String>),
    Structured(Vec<StructuredRecommendation>),
}

impl Recommendations {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Plain(v) => v.is_empty(),
            Self::Structured(v) => v.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Plain(v) => v.len(),
            Self::Structured(v) => v.len(),
        }
    }
}

/// Source-file metadata attached to a result. Always present on batch
/// entries so the presenter can name the document each result belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

/// Result of a single-document comprehensive analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub risk_assessment: RiskAssessment,
    pub summary: String,
    #[serde(default)]
    pub key_findings: Vec<KeyFinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Recommendations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_citations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_info: Option<DocumentInfo>,
}

/// Terminal state of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Running,
    Completed,
    CompletedWithErrors,
}

/// Aggregate result of a multi-document analysis.
///
/// Invariants: `completed_files == results.len()`,
/// `completed_files + errors.len() <= total_files`, and `status` is
/// `Completed` iff `errors` is empty and every file completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAnalysisResult {
    pub total_files: usize,
    pub completed_files: usize,
    pub status: BatchStatus,
    pub results: Vec<AnalysisResult>,
    pub errors: Vec<String>,
}

/// Counts and classification of redactions found in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactionDetection {
    pub redacted_sections: u32,
    /// Percentage of the document still visible, 0-100.
    pub visible_content_percentage: f64,
    pub integrity_check: IntegrityCheck,
    #[serde(default)]
    pub redaction_types: Vec<RedactionType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityCheck {
    /// Internal consistency of the visible text, 0-100.
    pub consistency_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactionType {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u32,
    pub description: String,
    pub risk_level: RiskLevel,
}

/// Risk assessment block of a redaction analysis. Carries a limitation
/// notice because scoring a partially hidden document is inherently bounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactionRiskAssessment {
    pub level: RiskLevel,
    pub score: f64,
    pub limitation_notice: String,
    #[serde(default)]
    pub factors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnforceabilityImpact {
    pub level: RiskLevel,
    pub description: String,
}

/// Clause-level impact of redacted content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClauseImpact {
    pub clause_type: String,
    pub visible_content: String,
    #[serde(default)]
    pub redacted_elements: Vec<String>,
    pub enforceability_impact: EnforceabilityImpact,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAssessment {
    #[serde(default)]
    pub critical_gaps: Vec<String>,
    #[serde(default)]
    pub legal_exposure: Vec<String>,
}

/// Result of a redaction-impact analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactionAnalysisResult {
    pub redaction_detection: RedactionDetection,
    pub risk_assessment: RedactionRiskAssessment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granular_clause_impact: Option<Vec<ClauseImpact>>,
    pub impact_assessment: ImpactAssessment,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub next_steps: Vec<String>,
}

/// Whether the analysis provider is currently usable.
///
/// Refreshed on demand, never cached across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationStatus {
    pub configured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_providers: Option<Vec<ProviderStatus>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStatus {
    pub name: String,
    pub configured: bool,
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_serde_names() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"HIGH\"");
        let level: RiskLevel = serde_json::from_str("\"CRITICAL\"").unwrap();
        assert_eq!(level, RiskLevel::Critical);
    }

    #[test]
    fn test_recommendations_plain_shape() {
        let recs: Recommendations =
            serde_json::from_str(r#"["Negotiate the cap", "Add a cure period"]"#).unwrap();
        assert_eq!(
            recs,
            Recommendations::Plain(vec![
                "Negotiate the cap".to_string(),
                "Add a cure period".to_string()
            ])
        );
    }

    #[test]
    fn test_recommendations_structured_shape() {
        let recs: Recommendations = serde_json::from_str(
            r#"[{"category": "Liability", "recommendation": "Cap damages", "implementation": "Amend clause 9"}]"#,
        )
        .unwrap();
        match recs {
            Recommendations::Structured(v) => {
                assert_eq!(v.len(), 1);
                assert_eq!(v[0].label(), "Liability");
            }
            other => panic!("expected structured recommendations, got {:?}", other),
        }
    }

    #[test]
    fn test_recommendation_default_label() {
        let rec: StructuredRecommendation =
            serde_json::from_str(r#"{"recommendation": "Review termination terms"}"#).unwrap();
        assert_eq!(rec.label(), "Recommendation");
    }

    #[test]
    fn test_redaction_type_field_rename() {
        let rt: RedactionType = serde_json::from_str(
            r#"{"type": "financial_terms", "count": 3, "description": "Pricing blocked out", "riskLevel": "HIGH"}"#,
        )
        .unwrap();
        assert_eq!(rt.kind, "financial_terms");
        assert_eq!(rt.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_analysis_result_round_trip() {
        let json = r#"{
            "riskAssessment": {"level": "MEDIUM", "score": 5.5, "factors": ["Unlimited liability"]},
            "summary": "Service agreement with one-sided indemnity.",
            "keyFindings": [
                {"category": "Indemnification", "finding": "One-way indemnity", "severity": "warning", "affectedParty": "service_provider"}
            ],
            "recommendations": ["Negotiate mutual indemnity"],
            "legalCitations": ["UCC 2-719"]
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.risk_assessment.level, RiskLevel::Medium);
        assert_eq!(result.key_findings.len(), 1);
        assert_eq!(result.key_findings[0].severity, Severity::Warning);

        let encoded = serde_json::to_string(&result).unwrap();
        let decoded: AnalysisResult = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, result);
    }
}
