use crate::error::ExtractionError;
use crate::utils::mapped_file::MappedFile;
use crate::TextUnit;
use lopdf::Document;
use std::path::Path;

/// Page text extraction using lopdf. One unit per page, numbered as lopdf
/// numbers them (1-based, document order). Pages without a text layer come
/// back as empty units.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn extract(&self, path: &Path) -> Result<Vec<TextUnit>, ExtractionError> {
        // Load the PDF document
        let mapped = MappedFile::open(path)?;
        let doc = Document::load_mem(mapped.as_slice())?;

        // Extract text page by page
        let pages = doc.get_pages();
        let mut units = Vec::with_capacity(pages.len());

        for &page_number in pages.keys() {
            let text = doc
                .extract_text(&[page_number])
                .map_err(|source| ExtractionError::Page {
                    page: page_number,
                    source,
                })?;
            units.push(TextUnit::new(page_number as usize, text));
        }

        Ok(units)
    }
}
