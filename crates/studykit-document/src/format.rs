//! Supported document formats, detected from the file extension

use crate::error::DocumentError;
use std::fmt;
use std::path::Path;

/// Format of a source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// `.txt`, read verbatim as UTF-8
    PlainText,
    /// `.pdf`, text concatenated page by page
    Pdf,
    /// `.docx`, text concatenated paragraph by paragraph
    WordDocument,
    /// `.pptx`, text collected slide by slide, shape by shape
    SlideDeck,
}

impl DocumentFormat {
    /// Every supported format
    pub const ALL: [DocumentFormat; 4] = [
        DocumentFormat::PlainText,
        DocumentFormat::Pdf,
        DocumentFormat::WordDocument,
        DocumentFormat::SlideDeck,
    ];

    /// Detect a format from an extension, ignoring case and a leading dot
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "txt" => Some(DocumentFormat::PlainText),
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::WordDocument),
            "pptx" => Some(DocumentFormat::SlideDeck),
            _ => None,
        }
    }

    /// Detect the format of `path`
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::UnsupportedFormat`] when the extension is
    /// missing or unknown.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_extension(&ext).ok_or(DocumentError::UnsupportedFormat(ext))
    }

    /// Canonical extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::PlainText => "txt",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::WordDocument => "docx",
            DocumentFormat::SlideDeck => "pptx",
        }
    }

    /// All supported extensions, for help text and file pickers
    pub fn extensions() -> Vec<&'static str> {
        Self::ALL.iter().map(|f| f.extension()).collect()
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentFormat::PlainText => "plain text",
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::WordDocument => "Word document",
            DocumentFormat::SlideDeck => "slide deck",
        };
        f.write_str(name)
    }
}
