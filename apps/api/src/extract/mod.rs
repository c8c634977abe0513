//! Text Extractor — turns an uploaded résumé into plain text.
//!
//! Extraction is the one stage that fails loudly: callers must be able to tell
//! "unreadable upload" apart from "readable but empty" and stop the pipeline early.

mod docx;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Error reading PDF: {0}")]
    Pdf(String),

    #[error("Error reading DOCX: {0}")]
    Docx(String),

    #[error("Text file is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Unsupported file type: {0}")]
    Unsupported(String),
}

impl ExtractionError {
    /// Stands in for a parser that panicked instead of returning an error.
    pub fn unparseable(kind: DocumentKind) -> Self {
        let message = "document could not be parsed".to_string();
        match kind {
            DocumentKind::Pdf => Self::Pdf(message),
            DocumentKind::Docx => Self::Docx(message),
            DocumentKind::Text => Self::Unsupported(message),
        }
    }
}

/// Declared kind of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
}

impl DocumentKind {
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            PDF_MIME => Some(Self::Pdf),
            DOCX_MIME => Some(Self::Docx),
            e if e.starts_with("text/") => Some(Self::Text),
            _ => None,
        }
    }

    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" | "text" | "md" => Some(Self::Text),
            _ => None,
        }
    }

    /// Content type wins; the file extension covers clients that send
    /// `application/octet-stream` or nothing at all.
    pub fn detect(
        content_type: Option<&str>,
        file_name: Option<&str>,
    ) -> Result<Self, ExtractionError> {
        content_type
            .and_then(Self::from_content_type)
            .or_else(|| file_name.and_then(Self::from_file_name))
            .ok_or_else(|| {
                ExtractionError::Unsupported(
                    file_name
                        .or(content_type)
                        .unwrap_or("unknown")
                        .to_string(),
                )
            })
    }
}

/// An uploaded payload plus its declared kind. Lives only for the extraction call.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub kind: DocumentKind,
    pub bytes: Bytes,
}

impl RawDocument {
    pub fn new(kind: DocumentKind, bytes: impl Into<Bytes>) -> Self {
        Self {
            kind,
            bytes: bytes.into(),
        }
    }
}

/// Extracts plain text, dispatching on the declared kind.
pub fn extract_text(document: &RawDocument) -> Result<String, ExtractionError> {
    match document.kind {
        DocumentKind::Pdf => extract_pdf(&document.bytes),
        DocumentKind::Docx => docx::extract_docx(&document.bytes),
        DocumentKind::Text => Ok(String::from_utf8(document.bytes.to_vec())?),
    }
}

/// pdf-extract separates pages with line breaks itself; only trailing space is trimmed.
fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;
    Ok(text.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_content_type() {
        assert_eq!(
            DocumentKind::from_content_type("application/pdf"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::from_content_type(DOCX_MIME),
            Some(DocumentKind::Docx)
        );
        assert_eq!(
            DocumentKind::from_content_type("text/plain; charset=utf-8"),
            Some(DocumentKind::Text)
        );
        assert_eq!(DocumentKind::from_content_type("image/png"), None);
    }

    #[test]
    fn test_kind_from_file_name() {
        assert_eq!(DocumentKind::from_file_name("cv.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_file_name("cv.docx"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_file_name("cv.txt"), Some(DocumentKind::Text));
        assert_eq!(DocumentKind::from_file_name("cv.doc"), None);
        assert_eq!(DocumentKind::from_file_name("README"), None);
    }

    #[test]
    fn test_detect_falls_back_to_extension() {
        let kind =
            DocumentKind::detect(Some("application/octet-stream"), Some("resume.docx")).unwrap();
        assert_eq!(kind, DocumentKind::Docx);
    }

    #[test]
    fn test_detect_rejects_unknown() {
        let err = DocumentKind::detect(Some("image/png"), Some("photo.png")).unwrap_err();
        assert!(matches!(err, ExtractionError::Unsupported(ref name) if name == "photo.png"));
    }

    #[test]
    fn test_text_passes_through_untouched() {
        let raw = "  Jane Doe\n\n• Built things  \n";
        let doc = RawDocument::new(DocumentKind::Text, raw.as_bytes().to_vec());
        assert_eq!(extract_text(&doc).unwrap(), raw);
    }

    #[test]
    fn test_empty_text_is_success_not_failure() {
        let doc = RawDocument::new(DocumentKind::Text, Vec::new());
        assert_eq!(extract_text(&doc).unwrap(), "");
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let doc = RawDocument::new(DocumentKind::Text, vec![0xff, 0xfe, 0x00]);
        assert!(matches!(
            extract_text(&doc),
            Err(ExtractionError::Encoding(_))
        ));
    }

    #[test]
    fn test_corrupt_pdf_is_an_error() {
        let doc = RawDocument::new(DocumentKind::Pdf, b"definitely not a pdf".to_vec());
        let err = extract_text(&doc).unwrap_err();
        assert!(err.to_string().starts_with("Error reading PDF"));
    }
}
