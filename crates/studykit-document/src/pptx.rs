//! Slide deck text: slides in presentation order, shapes in native order

use crate::error::BoxError;
use crate::ooxml::{attribute, read_part};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Read, Seek};
use tracing::debug;
use zip::ZipArchive;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";
const SLIDE_PREFIX: &str = "ppt/slides/slide";

/// Extract the text of every shape with a text body, joined with newlines
pub(crate) fn extract<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<String, BoxError> {
    let mut fragments = Vec::new();
    for part in slide_parts(archive)? {
        let xml = read_part(archive, &part)?.ok_or_else(|| format!("package has no {} part", part))?;
        fragments.extend(shape_texts(&xml)?);
    }
    Ok(fragments.join("\n"))
}

/// Slide part names in presentation order
///
/// Follows `p:sldIdLst` through the presentation relationships. Packages
/// without those parts fall back to numeric `slideN.xml` order.
fn slide_parts<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<String>, BoxError> {
    let presentation = read_part(archive, PRESENTATION_PART)?;
    let rels = read_part(archive, PRESENTATION_RELS_PART)?;

    if let (Some(presentation), Some(rels)) = (presentation, rels) {
        let targets = relationship_targets(&rels)?;
        let parts: Vec<String> = slide_rel_ids(&presentation)?
            .iter()
            .filter_map(|id| targets.get(id))
            .map(|target| resolve_target(target))
            .collect();
        if !parts.is_empty() {
            return Ok(parts);
        }
    }

    debug!("No slide list in presentation part, using slide file order");
    Ok(numbered_slides(archive.file_names()))
}

/// Relationship ids of `p:sldId` entries, in list order
fn slide_rel_ids(xml: &str) -> Result<Vec<String>, BoxError> {
    let mut reader = Reader::from_str(xml);
    let mut ids = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(tag) | Event::Empty(tag) if tag.name().as_ref() == b"p:sldId" => {
                if let Some(id) = attribute(&tag, b"r:id")? {
                    ids.push(id);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(ids)
}

/// Map of relationship id to target from a `.rels` part
fn relationship_targets(xml: &str) -> Result<HashMap<String, String>, BoxError> {
    let mut reader = Reader::from_str(xml);
    let mut targets = HashMap::new();
    loop {
        match reader.read_event()? {
            Event::Start(tag) | Event::Empty(tag) if tag.name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(target)) = (attribute(&tag, b"Id")?, attribute(&tag, b"Target")?) {
                    targets.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(targets)
}

/// Resolve a relationship target relative to the `ppt/` folder
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{}", target),
    }
}

/// `ppt/slides/slideN.xml` names sorted by N
fn numbered_slides<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut slides: Vec<(u32, String)> = names
        .filter_map(|name| {
            let number = name.strip_prefix(SLIDE_PREFIX)?.strip_suffix(".xml")?;
            Some((number.parse().ok()?, name.to_string()))
        })
        .collect();
    slides.sort();
    slides.into_iter().map(|(_, name)| name).collect()
}

#[derive(Default)]
struct ShapeText {
    has_body: bool,
    paragraphs: Vec<String>,
}

/// Text of each `p:sp` shape that has a text body, in document order
///
/// A shape's paragraphs are joined with newlines. Tables and pictures carry
/// no shape text and are skipped.
fn shape_texts(xml: &str) -> Result<Vec<String>, BoxError> {
    let mut reader = Reader::from_str(xml);
    let mut shape: Option<ShapeText> = None;
    let mut texts = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(tag) => match tag.name().as_ref() {
                b"p:sp" => shape = Some(ShapeText::default()),
                b"p:txBody" => {
                    if let Some(shape) = shape.as_mut() {
                        shape.has_body = true;
                    }
                }
                b"a:p" => {
                    if let Some(shape) = shape.as_mut() {
                        shape.paragraphs.push(String::new());
                    }
                }
                b"a:t" => in_text = true,
                _ => {}
            },
            Event::Empty(tag) => {
                if let Some(shape) = shape.as_mut() {
                    match tag.name().as_ref() {
                        b"p:txBody" => shape.has_body = true,
                        b"a:p" => shape.paragraphs.push(String::new()),
                        b"a:br" => {
                            if let Some(paragraph) = shape.paragraphs.last_mut() {
                                paragraph.push('\n');
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::Text(text) if in_text => {
                if let Some(paragraph) = shape.as_mut().and_then(|s| s.paragraphs.last_mut()) {
                    paragraph.push_str(&text.unescape()?);
                }
            }
            Event::End(tag) => match tag.name().as_ref() {
                b"a:t" => in_text = false,
                b"p:sp" => {
                    if let Some(done) = shape.take() {
                        if done.has_body {
                            texts.push(done.paragraphs.join("\n"));
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(texts)
}
