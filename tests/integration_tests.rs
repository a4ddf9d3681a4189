//! Integration tests for Book Organizer
//!
//! These tests run the full pipeline against real PDF and EPUB files written to
//! a temporary directory, with the completion service replaced by a mock.

use book_organizer::classifier::{ClassifyError, MockClassifier, OpenAiClassifier};
use book_organizer::metadata::{self, ExtractError};
use book_organizer::models::BookClassification;
use book_organizer::pipeline::{self, classify_file, prepare, PipelineError};
use book_organizer::prompt::SYSTEM_PROMPT;
use book_organizer::ui::OutputFormat;
use lopdf::{dictionary, Document, Object};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

const NYSTROM_FOLDER: &str =
    "Computer Science/Theoretical Computer Science/Programming Languages & Compilers";

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

fn write_epub(path: &Path, metadata: &str) {
    let container = r#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;
    let opf = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">{}</metadata>
</package>"#,
        metadata
    );

    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in [
        ("mimetype", "application/epub+zip"),
        ("META-INF/container.xml", container),
        ("content.opf", opf.as_str()),
    ] {
        zip.start_file(name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn test_pdf_summary_lists_info_entries_in_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("example.pdf");
    write_pdf(
        &path,
        Some(dictionary! {
            "Author" => Object::string_literal("A. Smith"),
            "Title" => Object::string_literal("Example"),
        }),
    );

    let summary = metadata::extract(&path).unwrap();
    assert_eq!(
        summary.lines(),
        [
            format!("Filename: {}", path.display()),
            "Author: A. Smith".to_string(),
            "Title: Example".to_string(),
        ]
    );
}

#[test]
fn test_epub_summary_omits_empty_description() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dune.epub");
    write_epub(
        &path,
        "<dc:title>Dune</dc:title><dc:creator>Herbert</dc:creator><dc:description></dc:description>",
    );

    let summary = metadata::extract(&path).unwrap();
    assert_eq!(
        summary.to_message(),
        format!("Filename: {}\nTitle: Dune\nAuthors: Herbert\n", path.display())
    );
}

#[test]
fn test_epub_summary_joins_authors_and_keeps_description() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sicp.epub");
    write_epub(
        &path,
        "<dc:title>SICP</dc:title>\
         <dc:creator>Abelson</dc:creator>\
         <dc:creator>Sussman</dc:creator>\
         <dc:description>Programs as data.</dc:description>",
    );

    let summary = metadata::extract(&path).unwrap();
    assert_eq!(
        &summary.lines()[1..],
        [
            "Title: SICP".to_string(),
            "Authors: Abelson, Sussman".to_string(),
            "Description: Programs as data.".to_string(),
        ]
    );
}

#[test]
fn test_corrupt_epub_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corrupt.epub");
    std::fs::write(&path, b"PK not really").unwrap();

    assert!(matches!(
        metadata::extract(&path),
        Err(ExtractError::Parse { .. })
    ));
}

#[test]
fn test_prepare_builds_system_then_user() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Crafting Interpreters by Robert Nystrom (z-lib.org).pdf");
    write_pdf(&path, None);

    let conversation = prepare(&path).unwrap();
    assert_eq!(conversation.system().content, SYSTEM_PROMPT);
    assert_eq!(
        conversation.user().content,
        format!("Filename: {}\n", path.display())
    );
}

#[tokio::test]
async fn test_end_to_end_with_mock_classifier() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Crafting Interpreters by Robert Nystrom (z-lib.org).pdf");
    write_pdf(&path, None);

    let expected =
        BookClassification::without_edition("Crafting Interpreters", "Nystrom", NYSTROM_FOLDER);
    let classifier = MockClassifier::with_classification(&expected);

    let result = classify_file(&path, &classifier).await.unwrap();
    assert_eq!(result.prompt, format!("Filename: {}\n", path.display()));
    assert_eq!(result.classification, expected);

    let received = classifier.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].user().content, result.prompt);
}

#[tokio::test]
async fn test_end_to_end_over_http() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Crafting Interpreters by Robert Nystrom (z-lib.org).pdf");
    write_pdf(&path, None);

    let reply = serde_json::json!({
        "title": "Crafting Interpreters",
        "author_surnames": "Nystrom",
        "has_edition": false,
        "edition": -1,
        "folder": NYSTROM_FOLDER,
    })
    .to_string();
    let body = serde_json::json!({
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": reply },
            "finish_reason": "stop"
        }]
    })
    .to_string();

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer integration-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(1)
        .create_async()
        .await;

    let classifier = OpenAiClassifier::new("integration-key", "gpt-3.5-turbo")
        .unwrap()
        .with_base_url(&server.url());

    let result = classify_file(&path, &classifier).await.unwrap();
    mock.assert_async().await;

    assert_eq!(result.classification.title, "Crafting Interpreters");
    assert_eq!(result.classification.surnames(), vec!["Nystrom"]);
    assert!(!result.classification.has_edition);
    assert_eq!(result.classification.edition, -1);
    assert_eq!(result.classification.folder, NYSTROM_FOLDER);
}

#[tokio::test]
async fn test_server_error_fails_the_pipeline() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let classifier = OpenAiClassifier::new("integration-key", "gpt-3.5-turbo")
        .unwrap()
        .with_base_url(&server.url());

    let result = classify_file(Path::new("book.mobi"), &classifier).await;
    assert!(matches!(
        result,
        Err(PipelineError::Classify(ClassifyError::Transport(_)))
    ));
}

#[tokio::test]
async fn test_run_over_http_failure_prints_only_prompt() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let classifier = OpenAiClassifier::new("integration-key", "gpt-3.5-turbo")
        .unwrap()
        .with_base_url(&server.url());

    let mut out = Vec::new();
    let result = pipeline::run(
        Path::new("book.mobi"),
        &classifier,
        &mut out,
        OutputFormat::Plain,
        false,
    )
    .await;

    assert!(matches!(
        result,
        Err(PipelineError::Classify(ClassifyError::Transport(_)))
    ));
    assert_eq!(String::from_utf8(out).unwrap(), "Filename: book.mobi\n\n");
}
