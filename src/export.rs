//! Report export.
//!
//! Serializes an analysis result to JSON or renders it as a standalone
//! HTML report. Export failures never invalidate the result itself.

use std::fmt::Write as _;
use std::path::Path;

use thiserror::Error;

use crate::models::{AnalysisResult, Recommendations};

/// Errors that can occur during report export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Unsupported export format: {0}")]
    Unsupported(String),
}

/// Escape HTML special characters for safe rendering.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Exports analysis results to report files.
pub struct ReportExporter;

impl ReportExporter {
    /// Write the result as pretty-printed JSON.
    pub fn export_json(result: &AnalysisResult, path: &Path) -> Result<(), ExportError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, result)?;
        Ok(())
    }

    /// Write the result as a standalone HTML report.
    pub fn export_html(result: &AnalysisResult, path: &Path) -> Result<(), ExportError> {
        std::fs::write(path, Self::render_html(result))?;
        Ok(())
    }

    /// PDF report rendering is not implemented; callers get a typed error
    /// rather than a broken file.
    pub fn export_pdf(_result: &AnalysisResult, _path: &Path) -> Result<(), ExportError> {
        Err(ExportError::Unsupported("pdf".to_string()))
    }

    fn render_html(result: &AnalysisResult) -> String {
        let mut body = String::new();

        let title = result
            .document_info
            .as_ref()
            .map(|info| info.file_name.as_str())
            .unwrap_or("Document");

        let _ = write!(
            body,
            "<h1>Legal Document Analysis: {}</h1>\n<p class=\"generated\">Generated {}</p>\n",
            html_escape(title),
            chrono::Utc::now().format("%Y-%m-%d %H:%M UTC")
        );

        let risk = &result.risk_assessment;
        let _ = write!(
            body,
            "<section><h2>Risk Assessment</h2>\n<p class=\"risk risk-{}\">Level: {} &mdash; Score: {}/10</p>\n",
            risk.level.as_str().to_lowercase(),
            risk.level.as_str(),
            risk.score
        );
        for (label, factors) in [
            ("Service Provider Risks", &risk.service_provider_risks),
            ("Client Risks", &risk.client_risks),
            ("Risk Factors", &risk.factors),
        ] {
            if let Some(items) = factors {
                if !items.is_empty() {
                    let _ = write!(body, "<h3>{}</h3>\n<ul>\n", label);
                    for item in items {
                        let _ = write!(body, "<li>{}</li>\n", html_escape(item));
                    }
                    body.push_str("</ul>\n");
                }
            }
        }
        body.push_str("</section>\n");

        let _ = write!(
            body,
            "<section><h2>Executive Summary</h2>\n<p>{}</p></section>\n",
            html_escape(&result.summary)
        );

        if !result.key_findings.is_empty() {
            body.push_str("<section><h2>Key Findings</h2>\n");
            for finding in &result.key_findings {
                let _ = write!(
                    body,
                    "<div class=\"finding\"><h3>{} <span class=\"severity\">[{:?}]</span></h3>\n<p>{}</p>\n",
                    html_escape(&finding.category),
                    finding.severity,
                    html_escape(&finding.finding)
                );
                if let Some(impact) = &finding.impact {
                    let _ = write!(body, "<p>Impact: {}</p>\n", html_escape(impact));
                }
                body.push_str("</div>\n");
            }
            body.push_str("</section>\n");
        }

        if let Some(recommendations) = &result.recommendations {
            if !recommendations.is_empty() {
                body.push_str("<section><h2>Recommendations</h2>\n<ol>\n");
                match recommendations {
                    Recommendations::Plain(items) => {
                        for item in items {
                            let _ = write!(body, "<li>{}</li>\n", html_escape(item));
                        }
                    }
                    Recommendations::Structured(items) => {
                        for item in items {
                            let _ = write!(
                                body,
                                "<li><strong>{}</strong>: {}",
                                html_escape(item.label()),
                                html_escape(&item.recommendation)
                            );
                            if let Some(implementation) = &item.implementation {
                                let _ = write!(
                                    body,
                                    "<br>Implementation: {}",
                                    html_escape(implementation)
                                );
                            }
                            body.push_str("</li>\n");
                        }
                    }
                }
                body.push_str("</ol></section>\n");
            }
        }

        if let Some(citations) = &result.legal_citations {
            if !citations.is_empty() {
                body.push_str("<section><h2>Legal Citations</h2>\n<ul>\n");
                for citation in citations {
                    let _ = write!(body, "<li>{}</li>\n", html_escape(citation));
                }
                body.push_str("</ul></section>\n");
            }
        }

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Legal Document Analysis</title>\n<style>\nbody {{ font-family: sans-serif; max-width: 52rem; margin: 2rem auto; }}\n.risk {{ font-weight: bold; }}\n.risk-high, .risk-critical {{ color: #b00020; }}\n.risk-medium {{ color: #9a6700; }}\n.risk-low {{ color: #1a7f37; }}\n.generated {{ color: #666; }}\n</style>\n</head>\n<body>\n{}</body>\n</html>\n",
            body
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RiskAssessment, RiskLevel, StructuredRecommendation};

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            risk_assessment: RiskAssessment {
                level: RiskLevel::High,
                score: 7.5,
                service_provider_risks: None,
                client_risks: None,
                factors: Some(vec!["Uncapped liability <clause 9>".to_string()]),
            },
            summary: "One-sided service agreement.".to_string(),
            key_findings: Vec::new(),
            recommendations: Some(Recommendations::Structured(vec![StructuredRecommendation {
                category: None,
                recommendation: "Cap damages".to_string(),
                implementation: None,
            }])),
            legal_citations: None,
            document_info: None,
        }
    }

    #[test]
    fn test_export_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let result = sample_result();

        ReportExporter::export_json(&result, &path).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let decoded: AnalysisResult = serde_json::from_str(&raw).unwrap();
        assert_eq!(decoded, result);
    }

    #[test]
    fn test_html_escapes_content() {
        let html = ReportExporter::render_html(&sample_result());
        assert!(html.contains("Uncapped liability &lt;clause 9&gt;"));
        assert!(!html.contains("<clause 9>"));
    }

    #[test]
    fn test_html_default_recommendation_label() {
        let html = ReportExporter::render_html(&sample_result());
        assert!(html.contains("<strong>Recommendation</strong>: Cap damages"));
    }

    #[test]
    fn test_pdf_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            ReportExporter::export_pdf(&sample_result(), &dir.path().join("r.pdf")).unwrap_err();
        assert!(matches!(err, ExportError::Unsupported(_)));
    }
}
