//! Word document text: one line per paragraph, in document order

use crate::error::BoxError;
use crate::ooxml::read_part;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Read, Seek};
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract the text of every paragraph, joined with newlines
pub(crate) fn extract<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<String, BoxError> {
    let xml = read_part(archive, DOCUMENT_PART)?
        .ok_or_else(|| format!("package has no {} part", DOCUMENT_PART))?;
    Ok(paragraphs(&xml)?.join("\n"))
}

/// Collect paragraph texts from `word/document.xml`
///
/// Paragraphs are listed in the order they start, so a text-box paragraph
/// follows the paragraph anchoring it. Empty paragraphs yield empty strings
/// so blank lines survive. Tab stops in paragraph properties and
/// `mc:Fallback` copies of text boxes are skipped.
fn paragraphs(xml: &str) -> Result<Vec<String>, BoxError> {
    let mut reader = Reader::from_str(xml);
    let mut done: Vec<String> = Vec::new();
    // indexes into `done` of the paragraphs still open, innermost last
    let mut open: Vec<usize> = Vec::new();
    let mut in_text = false;
    let mut in_tab_stops = false;
    let mut fallback_depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(tag) => {
                let name = tag.name();
                if name.as_ref() == b"mc:Fallback" {
                    fallback_depth += 1;
                } else if fallback_depth == 0 {
                    match name.as_ref() {
                        b"w:p" => {
                            open.push(done.len());
                            done.push(String::new());
                        }
                        b"w:t" => in_text = true,
                        b"w:tabs" => in_tab_stops = true,
                        _ => {}
                    }
                }
            }
            Event::Empty(tag) if fallback_depth == 0 => match tag.name().as_ref() {
                b"w:p" => done.push(String::new()),
                b"w:tab" if !in_tab_stops => {
                    if let Some(paragraph) = innermost(&mut done, &open) {
                        paragraph.push('\t');
                    }
                }
                b"w:br" | b"w:cr" => {
                    if let Some(paragraph) = innermost(&mut done, &open) {
                        paragraph.push('\n');
                    }
                }
                _ => {}
            },
            Event::Text(text) if in_text && fallback_depth == 0 => {
                if let Some(paragraph) = innermost(&mut done, &open) {
                    paragraph.push_str(&text.unescape()?);
                }
            }
            Event::End(tag) => {
                let name = tag.name();
                if name.as_ref() == b"mc:Fallback" {
                    fallback_depth = fallback_depth.saturating_sub(1);
                } else if fallback_depth == 0 {
                    match name.as_ref() {
                        b"w:t" => in_text = false,
                        b"w:tabs" => in_tab_stops = false,
                        b"w:p" => {
                            open.pop();
                        }
                        _ => {}
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(done)
}

fn innermost<'a>(done: &'a mut [String], open: &[usize]) -> Option<&'a mut String> {
    open.last().and_then(|&slot| done.get_mut(slot))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(inner: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            inner
        )
    }

    #[test]
    fn test_paragraphs_in_order() {
        let xml = body(
            "<w:p><w:r><w:t>First</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Sec</w:t></w:r><w:r><w:t>ond</w:t></w:r></w:p>",
        );
        assert_eq!(paragraphs(&xml).unwrap(), vec!["First", "Second"]);
    }

    #[test]
    fn test_empty_paragraphs_keep_their_line() {
        let xml = body("<w:p><w:r><w:t>Top</w:t></w:r></w:p><w:p/><w:p></w:p><w:p><w:r><w:t>Bottom</w:t></w:r></w:p>");
        assert_eq!(paragraphs(&xml).unwrap(), vec!["Top", "", "", "Bottom"]);
    }

    #[test]
    fn test_tabs_breaks_and_entities() {
        let xml = body(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>A</w:t><w:tab/><w:t xml:space="preserve">B &amp; C</w:t><w:br/><w:t>D</w:t></w:r></w:p>"#,
        );
        assert_eq!(paragraphs(&xml).unwrap(), vec!["A\tB & C\nD"]);
    }

    #[test]
    fn test_fallback_copies_are_skipped() {
        let xml = body(
            "<w:p><w:r><mc:AlternateContent>\
             <mc:Choice><w:txbxContent><w:p><w:r><w:t>Boxed</w:t></w:r></w:p></w:txbxContent></mc:Choice>\
             <mc:Fallback><w:txbxContent><w:p><w:r><w:t>Boxed</w:t></w:r></w:p></w:txbxContent></mc:Fallback>\
             </mc:AlternateContent></w:r></w:p>",
        );
        assert_eq!(paragraphs(&xml).unwrap(), vec!["", "Boxed"]);
    }

    #[test]
    fn test_text_box_follows_its_host_paragraph() {
        let xml = body(
            "<w:p><w:r><w:t>Before</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Host</w:t></w:r><w:r><w:txbxContent><w:p><w:r><w:t>Boxed</w:t></w:r></w:p></w:txbxContent></w:r><w:r><w:t> text</w:t></w:r></w:p>\
             <w:p><w:r><w:t>After</w:t></w:r></w:p>",
        );
        assert_eq!(paragraphs(&xml).unwrap(), vec!["Before", "Host text", "Boxed", "After"]);
    }

    #[test]
    fn test_text_outside_runs_is_ignored() {
        let xml = body("<w:p><w:r><w:instrText>PAGE</w:instrText><w:t>Visible</w:t></w:r></w:p>");
        assert_eq!(paragraphs(&xml).unwrap(), vec!["Visible"]);
    }
}
