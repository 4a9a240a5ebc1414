//! CLI commands implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

use crate::config::ProviderConfig;
use crate::export::ReportExporter;
use crate::models::UploadCandidate;
use crate::provider::HttpAnalysisProvider;
use crate::services::{AnalysisEvent, AnalysisOutput, AnalysisService, RedactionService};

use super::render;

#[derive(Parser)]
#[command(name = "lexiscan")]
#[command(about = "AI-assisted legal document ingestion and risk analysis")]
#[command(version)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one or more legal documents
    Analyze {
        /// Document files (TXT, DOC, or DOCX)
        files: Vec<PathBuf>,
        /// Jurisdiction to frame the analysis in
        #[arg(short, long, default_value = "US", env = "LEXISCAN_JURISDICTION")]
        jurisdiction: String,
        /// Write the report as JSON to this path (single document only)
        #[arg(long)]
        output_json: Option<PathBuf>,
        /// Write the report as HTML to this path (single document only)
        #[arg(long)]
        output_html: Option<PathBuf>,
    },

    /// Analyze a document with redacted content
    Redact {
        /// Document file (TXT, DOC, or DOCX)
        file: PathBuf,
        /// Jurisdiction to frame the analysis in
        #[arg(short, long, default_value = "US", env = "LEXISCAN_JURISDICTION")]
        jurisdiction: String,
        /// Write the report as JSON to this path
        #[arg(long)]
        output_json: Option<PathBuf>,
    },

    /// Show analysis provider configuration status
    Status,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ProviderConfig::load(cli.config.as_deref())?;
    let provider = Arc::new(HttpAnalysisProvider::new(config));

    match cli.command {
        Commands::Analyze {
            files,
            jurisdiction,
            output_json,
            output_html,
        } => analyze(provider, files, &jurisdiction, output_json, output_html).await,
        Commands::Redact {
            file,
            jurisdiction,
            output_json,
        } => redact(provider, file, &jurisdiction, output_json).await,
        Commands::Status => status(provider).await,
    }
}

/// Load a file from disk into an upload candidate, deriving the MIME type
/// from the extension.
async fn load_candidate(path: &PathBuf) -> anyhow::Result<UploadCandidate> {
    let bytes = tokio::fs::read(path).await?;
    let mime = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(UploadCandidate::new(bytes, mime, name))
}

/// Spawn a consumer that drives a progress bar from analysis events.
fn spawn_progress(mut event_rx: mpsc::Receiver<AnalysisEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let bar = ProgressBar::no_length();
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{pos}/{len}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );

        while let Some(event) = event_rx.recv().await {
            match event {
                AnalysisEvent::Started { total_files } => {
                    bar.set_length(total_files as u64);
                }
                AnalysisEvent::FileStarted { file_name } => {
                    bar.set_message(format!("analyzing {}", file_name));
                }
                AnalysisEvent::FileCompleted {
                    file_name,
                    risk_level,
                } => {
                    bar.println(format!(
                        "{} {} ({})",
                        style("done").green(),
                        file_name,
                        render::styled_risk(risk_level)
                    ));
                    bar.inc(1);
                }
                AnalysisEvent::FileFailed { file_name, error } => {
                    bar.println(format!("{} {}: {}", style("fail").red(), file_name, error));
                    bar.inc(1);
                }
                AnalysisEvent::Complete { completed, failed } => {
                    bar.finish_with_message(format!("{} completed, {} failed", completed, failed));
                }
            }
        }
    })
}

async fn analyze(
    provider: Arc<HttpAnalysisProvider>,
    files: Vec<PathBuf>,
    jurisdiction: &str,
    output_json: Option<PathBuf>,
    output_html: Option<PathBuf>,
) -> anyhow::Result<()> {
    if files.is_empty() {
        anyhow::bail!("no files given; pass one or more TXT, DOC, or DOCX documents");
    }

    let mut candidates = Vec::with_capacity(files.len());
    for path in &files {
        candidates.push(load_candidate(path).await?);
    }

    let max_content_chars = provider.config().max_content_chars;
    let service = AnalysisService::new(provider).with_max_content_chars(max_content_chars);
    let (event_tx, event_rx) = mpsc::channel(64);
    let progress = spawn_progress(event_rx);

    let output = service
        .analyze(candidates, jurisdiction, event_tx)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()));
    let _ = progress.await;

    match output? {
        AnalysisOutput::Single(result) => {
            render::print_analysis(&result);
            if let Some(path) = output_json {
                ReportExporter::export_json(&result, &path)?;
                println!("JSON report written to {}", path.display());
            }
            if let Some(path) = output_html {
                ReportExporter::export_html(&result, &path)?;
                println!("HTML report written to {}", path.display());
            }
        }
        AnalysisOutput::Batch(batch) => {
            render::print_batch(&batch);
            if output_json.is_some() || output_html.is_some() {
                eprintln!("note: report export applies to single-document analysis only");
            }
        }
    }
    Ok(())
}

async fn redact(
    provider: Arc<HttpAnalysisProvider>,
    file: PathBuf,
    jurisdiction: &str,
    output_json: Option<PathBuf>,
) -> anyhow::Result<()> {
    let candidate = load_candidate(&file).await?;
    let service = RedactionService::new(provider);

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("analyzing redactions in {}", candidate.original_name));
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));

    let result = service
        .analyze_redacted(&candidate, jurisdiction)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()));
    spinner.finish_and_clear();

    let result = result?;
    render::print_redaction(&result);

    if let Some(path) = output_json {
        let file = std::fs::File::create(&path)?;
        serde_json::to_writer_pretty(file, &result)?;
        println!("JSON report written to {}", path.display());
    }
    Ok(())
}

async fn status(provider: Arc<HttpAnalysisProvider>) -> anyhow::Result<()> {
    let status = provider_status(&provider).await;

    if status.configured {
        println!("{} analysis provider is configured", style("ok").green());
    } else {
        println!("{} analysis provider is not configured", style("!!").red());
        if let Some(message) = &status.message {
            println!("   {}", message);
        }
    }

    if let Some(providers) = &status.available_providers {
        for p in providers {
            println!(
                "   {}: configured={} available={}",
                p.name, p.configured, p.available
            );
        }
    }
    Ok(())
}

async fn provider_status(
    provider: &Arc<HttpAnalysisProvider>,
) -> crate::models::ConfigurationStatus {
    use crate::provider::AnalysisProvider;
    provider.configuration_status().await
}
