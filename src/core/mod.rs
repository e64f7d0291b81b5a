//! Rows, invoice records and aggregation.
//!
//! This module turns flat transaction rows into one [`InvoiceRecord`] per
//! customer and holds the configuration, currency formatting and batch
//! planning that the layout engine consumes.

mod aggregate;
mod batch;
mod builder;
mod classify;
mod config;
mod currency;
mod error;
mod rows;
mod types;

pub use aggregate::*;
pub use batch::*;
pub use builder::*;
pub use classify::*;
pub use config::*;
pub use currency::*;
pub use error::*;
pub use rows::*;
pub use types::*;
