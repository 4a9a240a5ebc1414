//! Text extraction from accepted uploads.
//!
//! Plain text is decoded directly, DOCX packages are unpacked with the zip
//! crate, and legacy DOC files go through the external `antiword` binary.

use std::io::{Cursor, Read, Write};
use std::process::Command;

use tempfile::NamedTempFile;
use thiserror::Error;

use super::validate::{MIME_DOC, MIME_DOCX, MIME_TXT};
use crate::models::{ExtractedDocument, UploadCandidate};

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle command output, extracting stdout on success or returning
/// the appropriate error.
fn handle_cmd_output(
    result: std::io::Result<std::process::Output>,
    tool_name: &str,
    error_prefix: &str,
) -> Result<String, ExtractionError> {
    match result {
        Ok(output) => {
            if output.status.success() {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(ExtractionError::ExtractionFailed(format!(
                    "{}: {}",
                    error_prefix, stderr
                )))
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ExtractionError::ToolNotFound(tool_name.to_string()))
        }
        Err(e) => Err(ExtractionError::Io(e)),
    }
}

/// Extracts normalized text from upload candidates by declared MIME type.
pub struct TextExtractor {
    /// Binary used for legacy DOC extraction.
    doc_binary: String,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self {
            doc_binary: "antiword".to_string(),
        }
    }
}

impl TextExtractor {
    /// Create a new text extractor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the legacy DOC extraction binary.
    pub fn with_doc_binary(mut self, binary: &str) -> Self {
        self.doc_binary = binary.to_string();
        self
    }

    /// Extract text from a candidate based on its declared MIME type.
    ///
    /// Can fail on corrupt content even when the candidate passed
    /// validation.
    pub async fn extract(
        &self,
        candidate: &UploadCandidate,
    ) -> Result<ExtractedDocument, ExtractionError> {
        let text = match candidate.declared_mime_type.as_str() {
            MIME_TXT => String::from_utf8_lossy(&candidate.bytes).into_owned(),
            MIME_DOCX => extract_docx(&candidate.bytes)?,
            MIME_DOC => self.extract_doc(candidate.bytes.clone()).await?,
            other => return Err(ExtractionError::UnsupportedFileType(other.to_string())),
        };

        Ok(ExtractedDocument {
            text,
            source_name: candidate.original_name.clone(),
            source_size: candidate.declared_size,
            source_mime_type: candidate.declared_mime_type.clone(),
        })
    }

    /// Extract a legacy DOC file by writing it to a tempfile and running
    /// the external tool on it.
    async fn extract_doc(&self, bytes: Vec<u8>) -> Result<String, ExtractionError> {
        let binary = self.doc_binary.clone();
        tokio::task::spawn_blocking(move || {
            let mut tmp = NamedTempFile::new()?;
            tmp.write_all(&bytes)?;
            tmp.flush()?;

            let output = Command::new(&binary).arg(tmp.path()).output();
            handle_cmd_output(
                output,
                &format!("{} (install antiword)", binary),
                "DOC extraction failed",
            )
        })
        .await
        .map_err(|e| ExtractionError::ExtractionFailed(format!("extraction task failed: {}", e)))?
    }
}

/// Pull the body text out of a DOCX package.
fn extract_docx(bytes: &[u8]) -> Result<String, ExtractionError> {
    let cursor = Cursor::new(bytes);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| ExtractionError::ExtractionFailed(format!("not a valid DOCX package: {}", e)))?;

    let mut document = archive.by_name("word/document.xml").map_err(|e| {
        ExtractionError::ExtractionFailed(format!("DOCX is missing word/document.xml: {}", e))
    })?;

    let mut xml = String::new();
    document
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::ExtractionFailed(format!("unreadable document.xml: {}", e)))?;

    Ok(document_xml_to_text(&xml))
}

/// Convert WordprocessingML to plain text, preserving paragraph breaks.
fn document_xml_to_text(xml: &str) -> String {
    let with_breaks = xml
        .replace("</w:p>", "\n")
        .replace("<w:br/>", "\n")
        .replace("<w:tab/>", "\t");

    let mut out = String::with_capacity(with_breaks.len() / 2);
    let mut in_tag = false;
    for c in with_breaks.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }

    // Entity order matters: &amp; must come last.
    out.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UploadCandidate;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut writer = zip::ZipWriter::new(Cursor::new(&mut buf));
            let options = zip::write::SimpleFileOptions::default();
            writer.start_file("word/document.xml", options).unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buf
    }

    #[tokio::test]
    async fn test_extract_plain_text() {
        let candidate = UploadCandidate::new(
            b"This agreement is binding.".to_vec(),
            MIME_TXT,
            "agreement.txt",
        );
        let doc = TextExtractor::new().extract(&candidate).await.unwrap();
        assert_eq!(doc.text, "This agreement is binding.");
        assert_eq!(doc.source_name, "agreement.txt");
        assert_eq!(doc.source_size, 26);
    }

    #[tokio::test]
    async fn test_extract_docx() {
        let xml = r#"<w:document><w:body><w:p><w:r><w:t>Section 1</w:t></w:r></w:p><w:p><w:r><w:t>Fees &amp; costs</w:t></w:r></w:p></w:body></w:document>"#;
        let candidate = UploadCandidate::new(docx_bytes(xml), MIME_DOCX, "contract.docx");
        let doc = TextExtractor::new().extract(&candidate).await.unwrap();
        assert_eq!(doc.text, "Section 1\nFees & costs");
    }

    #[tokio::test]
    async fn test_corrupt_docx_fails() {
        let candidate = UploadCandidate::new(b"not a zip".to_vec(), MIME_DOCX, "broken.docx");
        let err = TextExtractor::new().extract(&candidate).await.unwrap_err();
        assert!(matches!(err, ExtractionError::ExtractionFailed(_)));
    }

    #[tokio::test]
    async fn test_missing_doc_tool() {
        let candidate = UploadCandidate::new(b"\xd0\xcf\x11\xe0".to_vec(), MIME_DOC, "old.doc");
        let extractor = TextExtractor::new().with_doc_binary("definitely-not-a-real-binary");
        let err = extractor.extract(&candidate).await.unwrap_err();
        assert!(matches!(err, ExtractionError::ToolNotFound(_)));
    }

    #[test]
    fn test_document_xml_to_text_breaks() {
        let xml = "<w:p><w:r><w:t>a</w:t><w:br/><w:t>b</w:t></w:r></w:p>";
        assert_eq!(document_xml_to_text(xml), "a\nb");
    }
}
