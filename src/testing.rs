//! Fixtures shared by the unit tests.

use crate::core::extractor::TextExtractor;
use crate::error::ExtractionError;
use crate::{DocumentFormat, TextUnit};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use zip::write::FileOptions;
use zip::ZipWriter;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

/// Write a minimal DOCX with one paragraph per string.
pub(crate) fn write_docx(path: &Path, paragraphs: &[&str]) {
    let mut body = String::new();
    for text in paragraphs {
        if text.is_empty() {
            body.push_str("<w:p/>");
        } else {
            body.push_str(&format!(
                r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
                escape(text)
            ));
        }
    }
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );
    write_docx_xml(path, &document);
}

/// Write a DOCX whose `word/document.xml` is exactly `document`.
pub(crate) fn write_docx_xml(path: &Path, document: &str) {
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    zip.start_file("[Content_Types].xml", FileOptions::default())
        .unwrap();
    zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();
    zip.start_file("word/document.xml", FileOptions::default())
        .unwrap();
    zip.write_all(document.as_bytes()).unwrap();
    zip.finish().unwrap();
}

/// Write a PDF with one page per string, using the standard Courier font.
/// An empty string produces a page without a `/Contents` stream.
pub(crate) fn write_pdf(path: &Path, pages: &[&str]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
        };
        if !text.is_empty() {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let stream = Stream::new(dictionary! {}, content.encode().unwrap());
            let content_id = doc.add_object(stream);
            page.set("Contents", content_id);
        }
        kids.push(doc.add_object(page).into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Create an empty placeholder file so existence checks pass.
pub(crate) fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"stub").unwrap();
    path
}

#[derive(Debug, Clone)]
pub(crate) enum Stubbed {
    Units(Vec<String>),
    Fail(String),
    Panic,
}

/// Extractor keyed by file name; counts every call it receives.
#[derive(Debug, Default, Clone)]
pub(crate) struct StubExtractor {
    files: HashMap<String, Stubbed>,
    calls: Arc<AtomicUsize>,
}

impl StubExtractor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn units(mut self, name: &str, texts: &[&str]) -> Self {
        let texts = texts.iter().map(|t| t.to_string()).collect();
        self.files.insert(name.to_string(), Stubbed::Units(texts));
        self
    }

    pub(crate) fn failing(mut self, name: &str, message: &str) -> Self {
        self.files
            .insert(name.to_string(), Stubbed::Fail(message.to_string()));
        self
    }

    pub(crate) fn panicking(mut self, name: &str) -> Self {
        self.files.insert(name.to_string(), Stubbed::Panic);
        self
    }

    pub(crate) fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl TextExtractor for StubExtractor {
    fn extract(&self, path: &Path, _format: DocumentFormat) -> Result<Vec<TextUnit>, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match self.files.get(&name) {
            Some(Stubbed::Units(texts)) => Ok(texts
                .iter()
                .enumerate()
                .map(|(i, text)| TextUnit::new(i + 1, text.clone()))
                .collect()),
            Some(Stubbed::Fail(message)) => Err(ExtractionError::Malformed(message.clone())),
            Some(Stubbed::Panic) => panic!("stub extractor panicked on {name}"),
            None => Ok(Vec::new()),
        }
    }
}

/// Extractor that holds each call for `delay` and records how many calls
/// were running at the same time.
#[derive(Debug, Clone)]
pub(crate) struct SlowExtractor {
    delay: Duration,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl SlowExtractor {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn peak(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.peak)
    }
}

impl TextExtractor for SlowExtractor {
    fn extract(&self, _path: &Path, _format: DocumentFormat) -> Result<Vec<TextUnit>, ExtractionError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        thread::sleep(self.delay);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(vec![TextUnit::new(1, "1 Waited")])
    }
}
