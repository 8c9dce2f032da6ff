use owned_ttf_parser::Face;
use printpdf::{Mm, PdfDocument};
use thiserror::Error;

use crate::export::paginator::Document;

const EMBEDDED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const LAYER_NAME: &str = "Activities";

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Embedded font is unreadable: {0}")]
    Font(#[from] owned_ttf_parser::FaceParsingError),
    #[error("Failed to build PDF: {0}")]
    Render(#[from] printpdf::Error),
}

pub fn render_pdf(document: &Document) -> Result<Vec<u8>, PdfError> {
    let layout = &document.layout;
    let width = Mm(layout.page_width);
    let height = Mm(layout.page_height);

    let face = Face::parse(EMBEDDED_FONT, 0)?;
    let (pdf, first_page, first_layer) =
        PdfDocument::new(document.file_stem.as_str(), width, height, LAYER_NAME);
    let font = pdf.add_external_font(EMBEDDED_FONT)?;

    for (n, page) in document.pages.iter().enumerate() {
        let (page_index, layer_index) = if n == 0 {
            (first_page, first_layer)
        } else {
            pdf.add_page(width, height, LAYER_NAME)
        };
        let layer = pdf.get_page(page_index).get_layer(layer_index);

        for line in &page.lines {
            let missing = missing_glyphs(&face, &line.text);
            if !missing.is_empty() {
                tracing::warn!("No glyph for {:?} in '{}'", missing, line.text);
            }

            // Lines are placed from the top edge; PDF measures from the bottom.
            layer.use_text(
                line.text.as_str(),
                line.font_size,
                Mm(line.x),
                Mm(layout.page_height - line.y),
                &font,
            );
        }
    }

    Ok(pdf.save_to_bytes()?)
}

fn missing_glyphs(face: &Face, text: &str) -> Vec<char> {
    text.chars()
        .filter(|c| !c.is_whitespace() && face.glyph_index(*c).is_none())
        .collect()
}

/// Glyph ids of every text run, page by page, as written into the content
/// streams.
#[cfg(test)]
pub(crate) fn shown_glyphs(pdf: &[u8]) -> Vec<Vec<Vec<u16>>> {
    use printpdf::lopdf::{self, content::Content};

    let doc = lopdf::Document::load_mem(pdf).unwrap();
    doc.get_pages()
        .values()
        .map(|page_id| {
            let content = Content::decode(&doc.get_page_content(*page_id).unwrap()).unwrap();
            content
                .operations
                .iter()
                .filter(|op| op.operator == "Tj")
                .map(|op| match &op.operands[0] {
                    lopdf::Object::String(bytes, _) => bytes
                        .chunks(2)
                        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                        .collect::<Vec<u16>>(),
                    other => panic!("unexpected Tj operand {:?}", other),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// What `lines` look like once set in the embedded font. Panics on a
/// character the font cannot show.
#[cfg(test)]
pub(crate) fn glyph_lines(lines: &[&str]) -> Vec<Vec<u16>> {
    let face = Face::parse(EMBEDDED_FONT, 0).unwrap();
    lines
        .iter()
        .map(|line| {
            line.chars()
                .map(|c| face.glyph_index(c).unwrap_or_else(|| panic!("no glyph for {:?}", c)).0)
                .collect()
        })
        .collect()
}
