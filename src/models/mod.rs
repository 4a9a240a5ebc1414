//! Data models for documents and analysis reports.

mod document;
mod report;

pub use document::{ExtractedDocument, UploadCandidate};
pub use report::{
    AnalysisMode, AnalysisRequest, AnalysisResult, BatchAnalysisResult, BatchStatus, ClauseImpact,
    ConfigurationStatus, DocumentInfo, EnforceabilityImpact, ImpactAssessment, IntegrityCheck,
    KeyFinding, ProviderStatus, Recommendations, RedactionAnalysisResult, RedactionDetection,
    RedactionRequest, RedactionRiskAssessment, RedactionType, RiskAssessment, RiskLevel, Severity,
    StructuredRecommendation,
};
