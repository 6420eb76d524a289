use crate::error::ExtractionError;
use crate::utils::mapped_file::MappedFile;
use crate::TextUnit;
use roxmltree::{Document, Node};
use std::io::{Cursor, Read};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// DocxExtractor: paragraph texts from `word/document.xml` using roxmltree.
///
/// Every `w:p` in document order becomes one unit, including empty
/// paragraphs and paragraphs nested in table cells.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn extract(&self, path: &Path) -> Result<Vec<TextUnit>, ExtractionError> {
        // Open the DOCX archive
        let mapped = MappedFile::open(path)?;
        let mut archive = ZipArchive::new(Cursor::new(mapped.as_slice()))?;

        // Read the main document part
        let mut doc_xml = String::new();
        {
            let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| match e {
                ZipError::FileNotFound => ExtractionError::MissingPart(DOCUMENT_PART.to_string()),
                other => ExtractionError::Archive(other),
            })?;
            part.read_to_string(&mut doc_xml)?;
        }

        self.paragraphs_from_xml(&doc_xml)
    }

    /// Split an already-read `document.xml` into paragraph units.
    pub fn paragraphs_from_xml(&self, xml: &str) -> Result<Vec<TextUnit>, ExtractionError> {
        let doc = Document::parse(xml)?;

        let units = doc
            .descendants()
            .filter(|n| is_element(n, "p"))
            .enumerate()
            .map(|(i, p_node)| TextUnit::new(i + 1, self.paragraph_text(p_node)))
            .collect();

        Ok(units)
    }

    /// Concatenate the run text of a paragraph; tabs and breaks inside runs
    /// become `\t` and `\n`.
    fn paragraph_text(&self, p_node: Node) -> String {
        let mut text = String::new();

        for node in p_node.descendants().filter(|n| n.is_element()) {
            let in_run = node.parent().map_or(false, |parent| is_element(&parent, "r"));
            match node.tag_name().name() {
                "t" => {
                    if let Some(txt) = node.text() {
                        text.push_str(txt);
                    }
                }
                "tab" if in_run => text.push('\t'),
                "br" | "cr" if in_run => text.push('\n'),
                _ => {}
            }
        }

        text
    }
}

fn is_element(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}
