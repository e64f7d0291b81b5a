//! PDF output.
//!
//! [`PdfSurface`] draws layouts into a PDF document using the standard
//! Helvetica fonts, and [`DirectorySink`] stores finished documents as
//! `"{name}.pdf"` files.

mod sink;
mod surface;

pub use sink::DirectorySink;
pub use surface::{PdfInvoice, PdfSurface};
