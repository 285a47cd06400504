//! Source documents: a path plus its detected format

use crate::error::DocumentError;
use crate::format::DocumentFormat;
use crate::{docx, pdf, pptx};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::ZipArchive;

/// A document on disk whose format has been recognised
///
/// Opening checks that the file exists, then its extension; nothing is read
/// until [`SourceDocument::extract_text`] is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    path: PathBuf,
    format: DocumentFormat,
}

impl SourceDocument {
    /// Recognise the document at `path`
    ///
    /// # Errors
    ///
    /// - [`DocumentError::FileNotFound`] when the path is not an existing file
    /// - [`DocumentError::UnsupportedFormat`] for an unknown extension
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DocumentError::FileNotFound(path.to_path_buf()));
        }
        let format = DocumentFormat::from_path(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            format,
        })
    }

    /// Path of the document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Detected format
    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    /// Read the whole document and flatten it to text
    pub fn extract_text(&self) -> Result<String, DocumentError> {
        debug!("Extracting {} from {}", self.format, self.path.display());

        let text = match self.format {
            DocumentFormat::PlainText => self.read_plain_text()?,
            DocumentFormat::Pdf => pdf::extract(&self.path).map_err(|e| DocumentError::extraction(&self.path, e))?,
            DocumentFormat::WordDocument => {
                let mut archive = self.open_package()?;
                docx::extract(&mut archive).map_err(|e| DocumentError::extraction(&self.path, e))?
            }
            DocumentFormat::SlideDeck => {
                let mut archive = self.open_package()?;
                pptx::extract(&mut archive).map_err(|e| DocumentError::extraction(&self.path, e))?
            }
        };

        info!(
            "Extracted {} chars of {} from {}",
            text.chars().count(),
            self.format,
            self.path.display()
        );
        Ok(text)
    }

    fn read_plain_text(&self) -> Result<String, DocumentError> {
        let bytes = fs::read(&self.path).map_err(|e| self.io_error(e))?;
        String::from_utf8(bytes).map_err(|e| DocumentError::extraction(&self.path, e))
    }

    fn open_package(&self) -> Result<ZipArchive<File>, DocumentError> {
        let file = File::open(&self.path).map_err(|e| self.io_error(e))?;
        ZipArchive::new(file).map_err(|e| DocumentError::extraction(&self.path, e))
    }

    fn io_error(&self, err: io::Error) -> DocumentError {
        if err.kind() == io::ErrorKind::NotFound {
            DocumentError::FileNotFound(self.path.clone())
        } else {
            DocumentError::extraction(&self.path, err)
        }
    }
}
