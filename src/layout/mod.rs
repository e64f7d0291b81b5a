//! Page layout for invoice documents.
//!
//! [`InvoiceRenderer`] turns [`InvoiceRecord`]s into drawing operations on a
//! [`Surface`]. [`RecordingSurface`] keeps them in memory, which is what the
//! tests inspect; the `pdf` feature adds a surface that writes PDF files.

mod context;
mod engine;
mod metrics;
mod style;
mod surface;

pub use context::{Column, LayoutContext, TableColumns};
pub use engine::InvoiceRenderer;
pub use metrics::{char_width, clip_to_width, text_width};
pub use style::{Align, Color, FontWeight, PageSetup, RuleWeight, TextStyle};
pub use surface::{DrawOp, PlacedText, RecordedDocument, RecordedPage, RecordingSurface, Surface};

use crate::core::{BillingResult, InvoiceRecord};

/// Render one invoice with the default configuration into memory.
pub fn render_single(record: &InvoiceRecord) -> BillingResult<RecordedDocument> {
    InvoiceRenderer::default().render_single(RecordingSurface::new(), record)
}

/// Render a combined invoice with the default configuration into memory.
pub fn render_combined(
    destination: &str,
    period: &str,
    records: &[&InvoiceRecord],
) -> BillingResult<RecordedDocument> {
    InvoiceRenderer::default().render_combined(RecordingSurface::new(), destination, period, records)
}
