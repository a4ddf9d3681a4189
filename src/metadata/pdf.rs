//! PDF document-information dictionary reader.

use lopdf::{Document, Object};
use std::path::Path;

use super::{BookFormat, ExtractError};

/// Read every entry of the trailer `/Info` dictionary, in stored order.
///
/// Keys are returned without the leading `/` of the PDF name. Entries whose
/// value is not a string, name, number or boolean are skipped. A document
/// without an Info dictionary yields no entries.
pub fn read_info_dictionary(path: &Path) -> Result<Vec<(String, String)>, ExtractError> {
    let bytes = std::fs::read(path)?;
    let doc = Document::load_mem(&bytes)
        .map_err(|e| ExtractError::parse(BookFormat::Pdf, e.to_string()))?;

    let info = match doc.trailer.get(b"Info") {
        Ok(object) => resolve(&doc, object)
            .map_err(|e| ExtractError::parse(BookFormat::Pdf, e.to_string()))?,
        Err(_) => {
            tracing::debug!("No document-information dictionary in {}", path.display());
            return Ok(Vec::new());
        }
    };

    let dict = info
        .as_dict()
        .map_err(|e| ExtractError::parse(BookFormat::Pdf, format!("Info entry: {}", e)))?;

    let mut entries = Vec::new();
    for (key, value) in dict.iter() {
        let key = String::from_utf8_lossy(key).to_string();
        let value = resolve(&doc, value)
            .map_err(|e| ExtractError::parse(BookFormat::Pdf, e.to_string()))?;

        match render_value(value) {
            Some(text) => entries.push((key, text)),
            None => tracing::warn!(
                "Skipping Info entry {} with unsupported value type {}",
                key,
                kind(value)
            ),
        }
    }

    Ok(entries)
}

/// Follow an indirect reference to the object it points at.
fn resolve<'a>(doc: &'a Document, object: &'a Object) -> lopdf::Result<&'a Object> {
    match object {
        Object::Reference(id) => doc.get_object(*id),
        other => Ok(other),
    }
}

fn render_value(value: &Object) -> Option<String> {
    match value {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).to_string()),
        Object::Integer(i) => Some(i.to_string()),
        Object::Real(r) => Some(r.to_string()),
        Object::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

fn kind(value: &Object) -> &'static str {
    match value {
        Object::Null => "null",
        Object::Array(_) => "array",
        Object::Dictionary(_) => "dictionary",
        Object::Stream(_) => "stream",
        Object::Reference(_) => "reference",
        _ => "scalar",
    }
}

/// Decode a PDF text string.
///
/// UTF-16BE and UTF-8 strings are recognised by their byte order mark;
/// anything else is read as PDFDocEncoding, approximated by Latin-1.
fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8_lossy(rest).to_string();
    }

    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, StringFormat};
    use tempfile::tempdir;

    fn write_pdf(path: &Path, info: Option<lopdf::Dictionary>) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => Object::Integer(0),
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        if let Some(info) = info {
            let info_id = doc.add_object(info);
            doc.trailer.set("Info", info_id);
        }
        doc.save(path).unwrap();
    }

    #[test]
    fn test_reads_entries_in_stored_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("example.pdf");
        write_pdf(
            &path,
            Some(dictionary! {
                "Author" => Object::string_literal("A. Smith"),
                "Title" => Object::string_literal("Example"),
            }),
        );

        let entries = read_info_dictionary(&path).unwrap();
        assert_eq!(
            entries,
            vec![
                ("Author".to_string(), "A. Smith".to_string()),
                ("Title".to_string(), "Example".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_info_dictionary_yields_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bare.pdf");
        write_pdf(&path, None);

        assert!(read_info_dictionary(&path).unwrap().is_empty());
    }

    #[test]
    fn test_renders_non_string_values_and_skips_arrays() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mixed.pdf");
        write_pdf(
            &path,
            Some(dictionary! {
                "Trapped" => "False",
                "Pages" => Object::Integer(412),
                "Keywords" => vec![Object::string_literal("a")],
            }),
        );

        let entries = read_info_dictionary(&path).unwrap();
        assert_eq!(
            entries,
            vec![
                ("Trapped".to_string(), "False".to_string()),
                ("Pages".to_string(), "412".to_string()),
            ]
        );
    }

    #[test]
    fn test_garbage_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let result = read_info_dictionary(&path);
        assert!(matches!(
            result,
            Err(ExtractError::Parse {
                format: BookFormat::Pdf,
                ..
            })
        ));
    }

    #[test]
    fn test_decode_utf16_string() {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in "Gödel".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(decode_text_string(&bytes), "Gödel");

        let object = Object::String(bytes, StringFormat::Hexadecimal);
        assert_eq!(render_value(&object).as_deref(), Some("Gödel"));
    }

    #[test]
    fn test_decode_latin1_string() {
        assert_eq!(decode_text_string(b"Caf\xe9"), "Café");
    }
}
