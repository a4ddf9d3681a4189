//! EPUB package metadata reader.
//!
//! Only the Dublin Core `title`, `creator` and `description` elements of the
//! OPF package document are read. The package document is located through
//! `META-INF/container.xml` as the OCF container format requires.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

use super::{BookFormat, ExtractError};

const CONTAINER_PATH: &str = "META-INF/container.xml";

/// Bibliographic fields of an EPUB package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpubMetadata {
    /// First non-empty `dc:title`
    pub title: Option<String>,

    /// Every non-empty `dc:creator`, in document order
    pub authors: Vec<String>,

    /// First non-empty `dc:description`
    pub description: Option<String>,
}

impl EpubMetadata {
    /// Open an EPUB file and read its package metadata.
    pub fn read(path: &Path) -> Result<Self, ExtractError> {
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file).map_err(zip_error)?;

        let container = read_entry(&mut archive, CONTAINER_PATH)?;
        let opf_path = rootfile_path(&container)?;
        tracing::debug!("EPUB package document: {}", opf_path);

        let opf = read_entry(&mut archive, &opf_path)?;
        Self::from_opf(&opf)
    }

    /// Parse the `<metadata>` section of an OPF package document.
    pub fn from_opf(xml: &str) -> Result<Self, ExtractError> {
        let mut reader = Reader::from_str(xml);
        let mut meta = EpubMetadata::default();

        let mut in_metadata = false;
        let mut current: Option<Field> = None;
        // Elements opened inside the current field, such as XHTML markup
        let mut nested = 0usize;
        let mut text = String::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    _ if current.is_some() => nested += 1,
                    b"metadata" => in_metadata = true,
                    name if in_metadata => {
                        current = Field::from_local_name(name);
                        text.clear();
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if current.is_some() {
                        let unescaped = e.unescape().map_err(xml_error)?;
                        text.push_str(&unescaped);
                    }
                }
                Ok(Event::CData(e)) => {
                    if current.is_some() {
                        text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Ok(Event::End(ref e)) => {
                    if nested > 0 {
                        nested -= 1;
                        continue;
                    }
                    if e.local_name().as_ref() == b"metadata" {
                        break;
                    }
                    if let Some(field) = current.take() {
                        meta.set(field, text.trim());
                        text.clear();
                    }
                }
                Ok(Event::Eof) => {
                    if !in_metadata {
                        return Err(ExtractError::parse(
                            BookFormat::Epub,
                            "package document has no <metadata> element",
                        ));
                    }
                    break;
                }
                Ok(_) => {}
                Err(e) => return Err(xml_error(e)),
            }
        }

        Ok(meta)
    }

    fn set(&mut self, field: Field, value: &str) {
        if value.is_empty() {
            return;
        }
        match field {
            Field::Title => {
                if self.title.is_none() {
                    self.title = Some(value.to_string());
                }
            }
            Field::Creator => self.authors.push(value.to_string()),
            Field::Description => {
                if self.description.is_none() {
                    self.description = Some(value.to_string());
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Title,
    Creator,
    Description,
}

impl Field {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"creator" => Some(Field::Creator),
            b"description" => Some(Field::Description),
            _ => None,
        }
    }
}

/// Find the `full-path` of the first `<rootfile>` in `container.xml`.
fn rootfile_path(container: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(container);

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"rootfile" {
                    if let Some(path) = get_attr(e, b"full-path")? {
                        return Ok(path);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(xml_error(e)),
        }
    }

    Err(ExtractError::parse(
        BookFormat::Epub,
        "container.xml does not name a package document",
    ))
}

fn get_attr(e: &BytesStart, name: &[u8]) -> Result<Option<String>, ExtractError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| ExtractError::parse(BookFormat::Epub, e.to_string()))?;
        if attr.key.local_name().as_ref() == name {
            let value = attr.unescape_value().map_err(xml_error)?;
            return Ok(Some(value.to_string()));
        }
    }
    Ok(None)
}

fn read_entry(archive: &mut ZipArchive<File>, name: &str) -> Result<String, ExtractError> {
    let mut entry = archive
        .by_name(name)
        .map_err(|e| ExtractError::parse(BookFormat::Epub, format!("{}: {}", name, e)))?;

    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .map_err(|e| ExtractError::parse(BookFormat::Epub, format!("{}: {}", name, e)))?;
    Ok(content)
}

fn zip_error(e: zip::result::ZipError) -> ExtractError {
    ExtractError::parse(BookFormat::Epub, format!("not a valid EPUB container: {}", e))
}

fn xml_error(e: impl std::fmt::Display) -> ExtractError {
    ExtractError::parse(BookFormat::Epub, format!("XML parsing error: {}", e))
}
