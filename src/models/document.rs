//! Document-side types for the ingestion pipeline.

/// A user-supplied file awaiting validation and extraction.
///
/// Ephemeral: created on selection, consumed by validation/extraction,
/// discarded afterwards. Never persisted.
#[derive(Debug, Clone)]
pub struct UploadCandidate {
    /// Raw file bytes.
    pub bytes: Vec<u8>,
    /// MIME type declared by the caller (from the upload or file extension).
    pub declared_mime_type: String,
    /// Declared size in bytes.
    pub declared_size: u64,
    /// Original file name, used for reporting only.
    pub original_name: String,
}

impl UploadCandidate {
    /// Build a candidate from in-memory bytes, deriving the declared size.
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>, name: impl Into<String>) -> Self {
        let declared_size = bytes.len() as u64;
        Self {
            bytes,
            declared_mime_type: mime_type.into(),
            declared_size,
            original_name: name.into(),
        }
    }
}

/// Normalized text extracted from an accepted upload.
///
/// Owned by a single orchestrator invocation; not shared across requests.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Extracted plain text.
    pub text: String,
    /// Name of the source file.
    pub source_name: String,
    /// Size of the source file in bytes.
    pub source_size: u64,
    /// Declared MIME type of the source file.
    pub source_mime_type: String,
}
