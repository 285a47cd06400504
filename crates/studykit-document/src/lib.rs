//! Studykit Document Text Extractor
//!
//! Flattens study material into a single string so it can be placed in a
//! prompt.
//!
//! # Formats
//!
//! | Extension | Text |
//! |---|---|
//! | `txt` | file content verbatim (UTF-8) |
//! | `pdf` | each page's text, pages joined by a newline |
//! | `docx` | each paragraph's text, paragraphs joined by a newline |
//! | `pptx` | each shape's text, slide by slide, joined by a newline |
//!
//! Any other extension fails with [`DocumentError::UnsupportedFormat`].
//!
//! # Example Usage
//!
//! ```no_run
//! use studykit_document::extract_text;
//!
//! let text = extract_text("lectures/week1.pptx")?;
//! println!("{}", text);
//! # Ok::<(), studykit_document::DocumentError>(())
//! ```

#![warn(missing_docs)]

mod docx;
mod error;
mod format;
mod ooxml;
mod pdf;
mod pptx;
mod source;

pub use error::{BoxError, DocumentError};
pub use format::DocumentFormat;
pub use source::SourceDocument;

use std::path::Path;

/// Extract the plain text of the document at `path`
///
/// # Errors
///
/// - [`DocumentError::FileNotFound`] when the file does not exist
/// - [`DocumentError::UnsupportedFormat`] for an unknown extension
/// - [`DocumentError::Extraction`] when the file cannot be read or decoded
pub fn extract_text(path: impl AsRef<Path>) -> Result<String, DocumentError> {
    SourceDocument::open(path)?.extract_text()
}
