//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::Result;
use crate::output::Formatter;
use tracing::{info, warn};

/// Execute the extract command, returning the formatted text.
pub fn execute_extract(args: &ExtractArgs, formatter: &Formatter) -> Result<String> {
    let text = studykit_document::extract_text(&args.file)?;

    info!("Extracted {} chars from {}", text.len(), args.file.display());
    if text.trim().is_empty() {
        warn!("{} contains no extractable text", args.file.display());
    }

    formatter.format_extracted(&args.file.display().to_string(), &text)
}
