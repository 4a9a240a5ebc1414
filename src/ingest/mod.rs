//! Document ingestion: file validation, text extraction, content budgeting.
//!
//! Raw files flow through `validate` → `TextExtractor` → `budget_content`
//! before anything is sent to the analysis provider.

mod budget;
mod extract;
mod validate;

pub use budget::{budget_content, DEFAULT_CONTENT_BUDGET};
pub use extract::{ExtractionError, TextExtractor};
pub use validate::{
    validate, ValidationError, ValidationOutcome, MAX_FILE_SIZE, MIME_DOC, MIME_DOCX, MIME_PDF,
    MIME_TXT,
};
