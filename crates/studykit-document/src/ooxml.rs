//! Shared helpers for Office Open XML packages (docx, pptx)
//!
//! Both formats are zip archives of XML parts. These helpers read a part by
//! name and pull attributes off start tags.

use crate::error::BoxError;
use quick_xml::events::BytesStart;
use std::io::{Read, Seek};
use zip::result::ZipError;
use zip::ZipArchive;

/// Read the part `name` as UTF-8, or `None` if the package has no such part
pub(crate) fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>, BoxError> {
    let mut part = match archive.by_name(name) {
        Ok(part) => part,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(Some(xml))
}

/// Value of the attribute whose qualified name is `key`
pub(crate) fn attribute(tag: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, BoxError> {
    for attr in tag.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
