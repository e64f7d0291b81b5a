use std::io::Write;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

use crate::core::{BillingError, BillingResult};
use crate::layout::{Color, FontWeight, PageSetup, Surface, TextStyle};

const REGULAR_FONT: &[u8] = b"F1";
const BOLD_FONT: &[u8] = b"F2";

/// Distance from the top of a line box to the text baseline, as a fraction
/// of the font size.
const BASELINE_RATIO: f64 = 0.9;

struct PdfPage {
    setup: PageSetup,
    operations: Vec<Operation>,
}

/// [`Surface`] producing a PDF document.
///
/// Layout coordinates grow downwards from the top-left corner; they are
/// flipped to PDF user space when drawn.
#[derive(Default)]
pub struct PdfSurface {
    pages: Vec<PdfPage>,
}

impl PdfSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, ops: impl IntoIterator<Item = Operation>) {
        if let Some(page) = self.pages.last_mut() {
            page.operations.extend(ops);
        }
    }

    fn page_height(&self) -> f64 {
        self.pages.last().map(|p| p.setup.height).unwrap_or_default()
    }
}

impl Surface for PdfSurface {
    type Document = PdfInvoice;

    fn begin_page(&mut self, setup: &PageSetup) {
        self.pages.push(PdfPage {
            setup: *setup,
            operations: Vec::new(),
        });
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        let baseline = self.page_height() - y - style.size * BASELINE_RATIO;
        let font = match style.weight {
            FontWeight::Regular => REGULAR_FONT,
            FontWeight::Bold => BOLD_FONT,
        };
        self.push([
            Operation::new("BT", vec![]),
            Operation::new("rg", color_operands(style.color)),
            Operation::new("Tf", vec![Object::Name(font.to_vec()), real(style.size)]),
            Operation::new("Td", vec![real(x), real(baseline)]),
            Operation::new("Tj", vec![Object::string_literal(win_ansi(text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
        let height = self.page_height();
        self.push([
            Operation::new("q", vec![]),
            Operation::new("RG", color_operands(color)),
            Operation::new("w", vec![real(width)]),
            Operation::new("m", vec![real(from.0), real(height - from.1)]),
            Operation::new("l", vec![real(to.0), real(height - to.1)]),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        let bottom = self.page_height() - y - height;
        self.push([
            Operation::new("q", vec![]),
            Operation::new("rg", color_operands(color)),
            Operation::new("re", vec![real(x), real(bottom), real(width), real(height)]),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    fn finish(self) -> BillingResult<PdfInvoice> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let resources_id = add_fonts(&mut doc);

        let mut kids = Vec::with_capacity(self.pages.len());
        for page in self.pages {
            let content = Content {
                operations: page.operations,
            }
            .encode()
            .map_err(|e| BillingError::Render(format!("failed to encode page content: {e}")))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "MediaBox" => vec![0.into(), 0.into(), real(page.setup.width), real(page.setup.height)],
                "Contents" => Object::Reference(content_id),
                "Resources" => Object::Reference(resources_id),
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        Ok(PdfInvoice { doc })
    }
}

/// A finished PDF invoice.
pub struct PdfInvoice {
    doc: Document,
}

impl PdfInvoice {
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Write the document to `target`.
    pub fn save_to<W: Write>(&mut self, target: &mut W) -> BillingResult<()> {
        self.doc
            .save_to(target)
            .map_err(|e| BillingError::Render(format!("failed to save PDF: {e}")))
    }

    pub fn to_bytes(&mut self) -> BillingResult<Vec<u8>> {
        let mut out = Vec::new();
        self.save_to(&mut out)?;
        Ok(out)
    }

    /// The underlying `lopdf` document.
    pub fn document(&self) -> &Document {
        &self.doc
    }
}

fn add_fonts(doc: &mut Document) -> ObjectId {
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => Object::Reference(regular_id),
            "F2" => Object::Reference(bold_id),
        },
    })
}

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

fn color_operands(color: Color) -> Vec<Object> {
    vec![real(color.r), real(color.g), real(color.b)]
}

/// Latin-1 bytes for `text`; anything outside that range becomes `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| u8::try_from(u32::from(ch)).unwrap_or(b'?'))
        .collect()
}
