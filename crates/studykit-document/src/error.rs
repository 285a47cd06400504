//! Error types for document text extraction

use std::path::PathBuf;
use thiserror::Error;

/// Boxed cause carried by [`DocumentError::Extraction`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while extracting text from a document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// File extension is not one of the supported formats
    #[error("Unsupported file format: {0:?}")]
    UnsupportedFormat(String),

    /// Path does not reference an existing file
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The file exists but could not be read or decoded
    #[error("Failed to extract text from {}: {source}", .path.display())]
    Extraction {
        /// Document that failed
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: BoxError,
    },
}

impl DocumentError {
    pub(crate) fn extraction(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        DocumentError::Extraction {
            path: path.into(),
            source: source.into(),
        }
    }
}
