//! Terminal rendering of analysis results.

use console::{style, StyledObject};

use crate::models::{
    AnalysisResult, BatchAnalysisResult, BatchStatus, Recommendations, RedactionAnalysisResult,
    RiskLevel, Severity,
};

/// Color a risk level the way the rest of the output expects.
pub fn styled_risk(level: RiskLevel) -> StyledObject<&'static str> {
    match level {
        RiskLevel::Low => style(level.as_str()).green(),
        RiskLevel::Medium => style(level.as_str()).yellow(),
        RiskLevel::High | RiskLevel::Critical => style(level.as_str()).red().bold(),
    }
}

fn severity_tag(severity: Severity) -> StyledObject<&'static str> {
    match severity {
        Severity::Info => style("info").cyan(),
        Severity::Warning => style("warning").yellow(),
        Severity::Critical => style("critical").red().bold(),
    }
}

fn heading(text: &str) {
    println!("\n{}", style(text).bold().underlined());
}

/// Print a single-document comprehensive analysis.
pub fn print_analysis(result: &AnalysisResult) {
    if let Some(info) = &result.document_info {
        heading(&format!("Analysis: {}", info.file_name));
    } else {
        heading("Analysis");
    }

    let risk = &result.risk_assessment;
    println!(
        "Risk: {}  Score: {}/10",
        styled_risk(risk.level),
        risk.score
    );
    for (label, factors) in [
        ("Service provider risks", &risk.service_provider_risks),
        ("Client risks", &risk.client_risks),
        ("Risk factors", &risk.factors),
    ] {
        if let Some(items) = factors {
            if !items.is_empty() {
                println!("{}:", label);
                for item in items {
                    println!("  - {}", item);
                }
            }
        }
    }

    heading("Executive Summary");
    println!("{}", result.summary);

    if !result.key_findings.is_empty() {
        heading("Key Findings");
        for finding in &result.key_findings {
            println!(
                "[{}] {}: {}",
                severity_tag(finding.severity),
                style(&finding.category).bold(),
                finding.finding
            );
            if let Some(impact) = &finding.impact {
                println!("    Impact: {}", impact);
            }
            if let Some(party) = &finding.affected_party {
                println!("    Affected party: {}", party.replace('_', " "));
            }
        }
    }

    if let Some(recommendations) = &result.recommendations {
        if !recommendations.is_empty() {
            heading("Recommendations");
            match recommendations {
                Recommendations::Plain(items) => {
                    for (i, item) in items.iter().enumerate() {
                        println!("{}. {}", i + 1, item);
                    }
                }
                Recommendations::Structured(items) => {
                    for item in items {
                        println!("- {}: {}", style(item.label()).bold(), item.recommendation);
                        if let Some(implementation) = &item.implementation {
                            println!("  Implementation: {}", implementation);
                        }
                    }
                }
            }
        }
    }

    if let Some(citations) = &result.legal_citations {
        if !citations.is_empty() {
            heading("Legal Citations");
            for citation in citations {
                println!("- {}", citation);
            }
        }
    }
}

/// Print a batch analysis summary.
pub fn print_batch(batch: &BatchAnalysisResult) {
    heading("Batch Analysis Results");
    let status = match batch.status {
        BatchStatus::Completed => style("completed").green(),
        BatchStatus::CompletedWithErrors => style("completed with errors").yellow(),
        BatchStatus::Running => style("running").cyan(),
    };
    println!(
        "Progress: {}/{} files  Status: {}",
        batch.completed_files, batch.total_files, status
    );

    if !batch.errors.is_empty() {
        heading("Errors");
        for error in &batch.errors {
            println!("{} {}", style("!").red(), error);
        }
    }

    if !batch.results.is_empty() {
        heading("Completed Analyses");
        for result in &batch.results {
            let name = result
                .document_info
                .as_ref()
                .map(|info| info.file_name.as_str())
                .unwrap_or("(unnamed)");
            let summary: String = result.summary.chars().take(200).collect();
            println!(
                "{} [{}] score {}/10, {} findings",
                style(name).bold(),
                styled_risk(result.risk_assessment.level),
                result.risk_assessment.score,
                result.key_findings.len()
            );
            println!("  {}", summary);
        }
    }
}

/// Print a redaction-impact analysis.
pub fn print_redaction(result: &RedactionAnalysisResult) {
    heading("Redaction Detection");
    let detection = &result.redaction_detection;
    println!(
        "Redacted sections: {}  Visible content: {}%  Integrity: {}%",
        detection.redacted_sections,
        detection.visible_content_percentage,
        detection.integrity_check.consistency_score
    );
    for rt in &detection.redaction_types {
        println!(
            "- {} ({} found, risk {}): {}",
            rt.kind.replace('_', " "),
            rt.count,
            styled_risk(rt.risk_level),
            rt.description
        );
    }

    heading("Risk Assessment");
    let risk = &result.risk_assessment;
    println!(
        "Risk: {}  Score: {}/10",
        styled_risk(risk.level),
        risk.score
    );
    println!("{}", style(&risk.limitation_notice).italic());
    for factor in &risk.factors {
        println!("  - {}", factor);
    }

    if let Some(clauses) = &result.granular_clause_impact {
        if !clauses.is_empty() {
            heading("Clause-Level Impact");
            for clause in clauses {
                println!(
                    "{} [{} impact]",
                    style(&clause.clause_type).bold(),
                    styled_risk(clause.enforceability_impact.level)
                );
                println!("  Visible: {}", clause.visible_content);
                for element in &clause.redacted_elements {
                    println!("  Redacted: {}", element);
                }
                println!("  {}", clause.enforceability_impact.description);
                for rec in &clause.recommendations {
                    println!("  Recommend: {}", rec);
                }
            }
        }
    }

    heading("Impact Assessment");
    for gap in &result.impact_assessment.critical_gaps {
        println!("{} {}", style("gap").red(), gap);
    }
    for exposure in &result.impact_assessment.legal_exposure {
        println!("{} {}", style("exposure").yellow(), exposure);
    }

    if !result.recommendations.is_empty() {
        heading("Recommendations");
        for (i, rec) in result.recommendations.iter().enumerate() {
            println!("{}. {}", i + 1, rec);
        }
    }

    if !result.next_steps.is_empty() {
        heading("Next Steps");
        for (i, step) in result.next_steps.iter().enumerate() {
            println!("{}. {}", i + 1, step);
        }
    }
}
