//! PDF text: one chunk per page, in page order

use crate::error::BoxError;
use lopdf::Document;
use std::path::Path;

/// Extract each page's text and join the pages with a newline
///
/// lopdf ends every page's text with a newline of its own, so consecutive
/// pages are separated by a blank line and the result ends with `\n`:
/// two pages reading `PageOne` and `PageTwo` give `"PageOne\n\nPageTwo\n"`.
pub(crate) fn extract(path: &Path) -> Result<String, BoxError> {
    let document = Document::load(path)?;
    let pages: Vec<u32> = document.get_pages().keys().copied().collect();

    let mut texts = Vec::with_capacity(pages.len());
    for page in pages {
        texts.push(document.extract_text(&[page])?);
    }
    Ok(texts.join("\n"))
}
