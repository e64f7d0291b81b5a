//! # billsheet
//!
//! Turns the transaction rows of a billing spreadsheet into one invoice per
//! customer and lays the invoices out as paginated documents.
//!
//! Every row is classified as a line item, a delivery fee, a discount or an
//! additional fee; line items are grouped by supplier. Records can be
//! rendered one per customer or several together in a combined document.
//!
//! All monetary values use [`rust_decimal::Decimal`].
//!
//! ## Quick Start
//!
//! ```rust
//! use billsheet::core::*;
//! use billsheet::layout;
//! use rust_decimal_macros::dec;
//!
//! let rows = vec![
//!     RowBuilder::item("Alice", "Fish", "Salmon", dec!(5), dec!(2)).date("1 Jan").build(),
//!     RowBuilder::delivery_fee("Alice", "Courier", dec!(3)).build(),
//!     RowBuilder::discount("Alice", "Promo", dec!(-1)).build(),
//! ];
//!
//! let invoices = build_invoices(&rows);
//! assert_eq!(list_customers(&invoices), vec!["Alice"]);
//!
//! let alice = &invoices["Alice"];
//! assert_eq!(alice.subtotal(), dec!(10));
//! assert_eq!(alice.grand_total(), dec!(12));
//!
//! let doc = layout::render_single(alice).unwrap();
//! assert_eq!(doc.page_count(), 1);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Rows, aggregation, configuration and the layout engine |
//! | `pdf` (default) | PDF surface and a directory sink, backed by `lopdf` |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod layout;

#[cfg(feature = "pdf")]
pub mod pdf;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
