//! Drawing backends.
//!
//! A [`Surface`] receives absolute drawing primitives in page coordinates
//! with the origin at the top-left corner and y growing downwards. Text is
//! positioned by the top of its line box. Cursor handling, page flow and
//! alignment all live in [`LayoutContext`](super::LayoutContext); surfaces
//! only draw.

use super::style::{Color, PageSetup, TextStyle};
use crate::core::BillingResult;

pub trait Surface {
    /// The sealed document produced by [`Surface::finish`].
    type Document;

    /// Start a new page. Called once before anything is drawn.
    fn begin_page(&mut self, setup: &PageSetup);

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);

    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);

    /// Seal the document. The surface cannot be drawn on afterwards.
    fn finish(self) -> BillingResult<Self::Document>;
}

/// One primitive drawn on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        x: f64,
        y: f64,
        style: TextStyle,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Color,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPage {
    pub setup: PageSetup,
    pub ops: Vec<DrawOp>,
}

/// A finished layout kept as data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordedDocument {
    pub pages: Vec<RecordedPage>,
}

/// A text operation together with the page it was drawn on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedText<'a> {
    pub page: usize,
    pub text: &'a str,
    pub x: f64,
    pub y: f64,
    pub style: &'a TextStyle,
}

impl RecordedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every text operation, in drawing order.
    pub fn placed_texts(&self) -> impl Iterator<Item = PlacedText<'_>> {
        self.pages.iter().enumerate().flat_map(|(page, p)| {
            p.ops.iter().filter_map(move |op| match op {
                DrawOp::Text { text, x, y, style } => Some(PlacedText {
                    page,
                    text,
                    x: *x,
                    y: *y,
                    style,
                }),
                _ => None,
            })
        })
    }

    /// The strings drawn, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.placed_texts().map(|t| t.text).collect()
    }

    /// First text operation whose string equals `needle`.
    pub fn find_text(&self, needle: &str) -> Option<PlacedText<'_>> {
        self.placed_texts().find(|t| t.text == needle)
    }

    /// Number of lines drawn with the given stroke width.
    pub fn count_lines(&self, width: f64) -> usize {
        self.ops()
            .filter(|op| matches!(op, DrawOp::Line { width: w, .. } if *w == width))
            .count()
    }

    /// Filled rectangles, in drawing order.
    pub fn rects(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops().filter(|op| matches!(op, DrawOp::Rect { .. }))
    }

    fn ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.pages.iter().flat_map(|p| p.ops.iter())
    }
}

/// Surface that records every primitive in memory.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    document: RecordedDocument,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.document.pages.last_mut() {
            page.ops.push(op);
        }
    }
}

impl Surface for RecordingSurface {
    type Document = RecordedDocument;

    fn begin_page(&mut self, setup: &PageSetup) {
        self.document.pages.push(RecordedPage {
            setup: *setup,
            ops: Vec::new(),
        });
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            style: *style,
        });
    }

    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
        self.push(DrawOp::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn finish(self) -> BillingResult<RecordedDocument> {
        Ok(self.document)
    }
}
