//! Upload validation by declared MIME type and size.

use thiserror::Error;

use crate::models::UploadCandidate;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_TXT: &str = "text/plain";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Hard per-file size ceiling: 10 MiB.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Why an upload was rejected. The `Display` text is the exact message
/// surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("PDF files are currently not supported. Please convert to DOC, DOCX, or TXT format for analysis.")]
    PdfUnsupported,

    #[error("Please upload TXT, DOC, or DOCX files only. PDF support is temporarily unavailable.")]
    UnsupportedFormat,

    #[error("File size must be less than 10MB.")]
    SizeExceeded,
}

/// Outcome of validating one upload. Never partially valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted,
    Rejected(ValidationError),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Validate a candidate by declared MIME type and size.
///
/// Rules apply in order and the first match wins. The PDF check runs before
/// the generic type check on purpose, so a PDF upload always gets the
/// PDF-specific message rather than the generic one. Do not fold these into
/// a single set-membership check.
pub fn validate(candidate: &UploadCandidate) -> ValidationOutcome {
    if candidate.declared_mime_type == MIME_PDF {
        return ValidationOutcome::Rejected(ValidationError::PdfUnsupported);
    }

    let allowed = [MIME_TXT, MIME_DOC, MIME_DOCX];
    if !allowed.contains(&candidate.declared_mime_type.as_str()) {
        return ValidationOutcome::Rejected(ValidationError::UnsupportedFormat);
    }

    if candidate.declared_size > MAX_FILE_SIZE {
        return ValidationOutcome::Rejected(ValidationError::SizeExceeded);
    }

    ValidationOutcome::Accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(mime: &str, size: u64) -> UploadCandidate {
        UploadCandidate {
            bytes: Vec::new(),
            declared_mime_type: mime.to_string(),
            declared_size: size,
            original_name: "test.txt".to_string(),
        }
    }

    #[test]
    fn test_pdf_rejected_regardless_of_size() {
        for size in [0, 100, MAX_FILE_SIZE, MAX_FILE_SIZE + 1] {
            assert_eq!(
                validate(&candidate(MIME_PDF, size)),
                ValidationOutcome::Rejected(ValidationError::PdfUnsupported)
            );
        }
    }

    #[test]
    fn test_pdf_message_wins_over_generic() {
        // An oversized PDF still gets the PDF-specific rejection.
        let outcome = validate(&candidate(MIME_PDF, MAX_FILE_SIZE * 2));
        assert_eq!(
            outcome,
            ValidationOutcome::Rejected(ValidationError::PdfUnsupported)
        );
    }

    #[test]
    fn test_unsupported_type() {
        assert_eq!(
            validate(&candidate("image/png", 100)),
            ValidationOutcome::Rejected(ValidationError::UnsupportedFormat)
        );
        assert_eq!(
            validate(&candidate("application/json", 100)),
            ValidationOutcome::Rejected(ValidationError::UnsupportedFormat)
        );
    }

    #[test]
    fn test_size_ceiling() {
        assert!(validate(&candidate(MIME_TXT, MAX_FILE_SIZE)).is_accepted());
        assert_eq!(
            validate(&candidate(MIME_TXT, MAX_FILE_SIZE + 1)),
            ValidationOutcome::Rejected(ValidationError::SizeExceeded)
        );
        assert_eq!(
            validate(&candidate(MIME_DOCX, 10_485_761)),
            ValidationOutcome::Rejected(ValidationError::SizeExceeded)
        );
    }

    #[test]
    fn test_accepted_types() {
        for mime in [MIME_TXT, MIME_DOC, MIME_DOCX] {
            assert!(validate(&candidate(mime, 1024)).is_accepted());
        }
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            ValidationError::PdfUnsupported.to_string(),
            "PDF files are currently not supported. Please convert to DOC, DOCX, or TXT format for analysis."
        );
        assert_eq!(
            ValidationError::UnsupportedFormat.to_string(),
            "Please upload TXT, DOC, or DOCX files only. PDF support is temporarily unavailable."
        );
        assert_eq!(
            ValidationError::SizeExceeded.to_string(),
            "File size must be less than 10MB."
        );
    }
}
