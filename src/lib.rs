//! lexiscan - AI-assisted legal document ingestion and risk analysis.
//!
//! Ingests legal documents (TXT, DOC, DOCX), extracts normalized text, and
//! drives an external AI provider to produce structured risk assessments:
//! single documents, batches with per-file failure isolation, and a
//! redaction-impact variant for documents with intentionally hidden content.

pub mod cli;
pub mod config;
pub mod export;
pub mod ingest;
pub mod models;
pub mod provider;
pub mod services;
